//! Dashlab CLI — export dashboard CSVs from a completed run and check the result.
//!
//! Commands:
//! - `export` — read a run JSON file and write `equity_curve.csv`,
//!   `basket_summary.csv` and `trade_log.csv`
//! - `check` — re-read `basket_summary.csv` and print win/loss and monthly totals

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use dashlab_export::{run_check, ExportConfig, Exporter, RunRecord, StdoutProgress};

#[derive(Parser)]
#[command(
    name = "dashlab",
    about = "Dashlab CLI — dashboard export for completed strategy runs"
)]
struct Cli {
    /// Log level for diagnostics on stderr (error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export dashboard CSV files from a run JSON file.
    Export {
        /// Path to the run JSON file (initial_capital, equity_curve, trades).
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML export config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory. Overrides the config file.
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },
    /// Print win/loss and monthly totals from a basket summary file.
    Check {
        /// Basket summary CSV to read.
        #[arg(long, default_value = "dashboard_data/basket_summary.csv")]
        file: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Export {
            input,
            config,
            output_dir,
        } => run_export(input, config, output_dir),
        Commands::Check { file } => {
            print!("{}", run_check(&file));
            Ok(())
        }
    }
}

fn run_export(
    input: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
) -> Result<()> {
    let mut config = match config_path {
        Some(path) => ExportConfig::from_file(&path)?,
        None => ExportConfig::default(),
    };
    if let Some(dir) = output_dir {
        config.output.dir = dir;
    }
    debug!(?config, "export config");

    let run = RunRecord::from_file(&input)
        .with_context(|| format!("failed to load run {}", input.display()))?;

    let exporter = Exporter::new(&config)?;
    let paths = exporter.export_run(&run, &StdoutProgress)?;

    println!(
        "Wrote {} equity points, {} baskets, {} trade log rows to {}",
        paths.equity_points,
        paths.baskets,
        paths.trade_log_rows,
        paths.output_dir.display()
    );
    Ok(())
}
