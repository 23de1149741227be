//! Dashboard export — CSV rendering of the equity series, basket summary and trade log.
//!
//! Three files are written into the output directory:
//! - `equity_curve.csv` — `date,total_equity,capital`
//! - `basket_summary.csv` — `date,net_pnl,duration_seconds`
//! - `trade_log.csv` — `basket_id,trade_num,lot_size,slippage_pips`
//!
//! Each file always carries its header row, even with zero data rows.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dashlab_core::{
    BasketAggregator, BasketRecord, EquityPoint, EquitySample, EquitySeriesBuilder,
    TradeEvent, TradeLogRecord,
};
use tracing::info;

use crate::config::ExportConfig;
use crate::input::RunRecord;
use crate::progress::ExportProgress;

pub const EQUITY_CURVE_FILE: &str = "equity_curve.csv";
pub const BASKET_SUMMARY_FILE: &str = "basket_summary.csv";
pub const TRADE_LOG_FILE: &str = "trade_log.csv";

// ─── CSV rendering ──────────────────────────────────────────────────

/// Equity series as CSV, both numeric columns to 2 decimals.
pub fn export_equity_csv(points: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "total_equity", "capital"])?;
    for p in points {
        wtr.write_record([
            &p.date.format("%Y-%m-%d").to_string(),
            &format!("{:.2}", p.total_equity),
            &format!("{:.2}", p.capital),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Basket summary as CSV: `net_pnl` to 2 decimals, `duration_seconds` to 3.
pub fn export_basket_summary_csv(baskets: &[BasketRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "net_pnl", "duration_seconds"])?;
    for b in baskets {
        wtr.write_record([
            &b.date.format("%Y-%m-%d").to_string(),
            &format!("{:.2}", b.net_pnl),
            &format!("{:.3}", b.duration_seconds),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Trade log as CSV. Lot size and slippage use their shortest exact form.
pub fn export_trade_log_csv(trade_log: &[TradeLogRecord]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["basket_id", "trade_num", "lot_size", "slippage_pips"])?;
    for t in trade_log {
        wtr.write_record([
            &t.basket_id.to_string(),
            &t.trade_num.to_string(),
            &t.lot_size.to_string(),
            &t.slippage_pips.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Exporter ───────────────────────────────────────────────────────

/// Paths and row counts of an export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportPaths {
    pub output_dir: PathBuf,
    pub equity_csv: PathBuf,
    pub basket_summary_csv: PathBuf,
    pub trade_log_csv: PathBuf,
    pub equity_points: usize,
    pub baskets: usize,
    pub trade_log_rows: usize,
}

/// Writes the three dashboard files for a run.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    equity: EquitySeriesBuilder,
    aggregator: BasketAggregator,
}

impl Exporter {
    /// Create the exporter, creating the output directory if absent.
    pub fn new(config: &ExportConfig) -> Result<Self> {
        let output_dir = config.output.dir.clone();
        std::fs::create_dir_all(&output_dir).with_context(|| {
            format!("failed to create output directory {}", output_dir.display())
        })?;
        Ok(Self {
            output_dir,
            equity: EquitySeriesBuilder::new(config.equity.clone()),
            aggregator: BasketAggregator::new(config.baskets.clone()),
        })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export an equity curve and trade history.
    pub fn export(
        &self,
        equity_curve: &[EquitySample],
        trades: &[TradeEvent],
        initial_capital: f64,
        progress: &dyn ExportProgress,
    ) -> Result<ExportPaths> {
        progress.on_start(&self.output_dir);

        let points = self.equity.build_samples(equity_curve, initial_capital);
        let equity_csv = self.output_dir.join(EQUITY_CURVE_FILE);
        write_file(&equity_csv, &export_equity_csv(&points)?)?;
        progress.on_file_written(&equity_csv, points.len());

        let aggregation = self.aggregator.aggregate(trades);

        let basket_summary_csv = self.output_dir.join(BASKET_SUMMARY_FILE);
        write_file(
            &basket_summary_csv,
            &export_basket_summary_csv(&aggregation.baskets)?,
        )?;
        progress.on_file_written(&basket_summary_csv, aggregation.baskets.len());

        let trade_log_csv = self.output_dir.join(TRADE_LOG_FILE);
        write_file(&trade_log_csv, &export_trade_log_csv(&aggregation.trade_log)?)?;
        progress.on_file_written(&trade_log_csv, aggregation.trade_log.len());

        let paths = ExportPaths {
            output_dir: self.output_dir.clone(),
            equity_csv,
            basket_summary_csv,
            trade_log_csv,
            equity_points: points.len(),
            baskets: aggregation.baskets.len(),
            trade_log_rows: aggregation.trade_log.len(),
        };
        info!(
            dir = %self.output_dir.display(),
            equity_points = paths.equity_points,
            baskets = paths.baskets,
            trade_log_rows = paths.trade_log_rows,
            "dashboard export complete"
        );
        progress.on_complete(&paths);
        Ok(paths)
    }

    /// Export a loaded run record.
    pub fn export_run(&self, run: &RunRecord, progress: &dyn ExportProgress) -> Result<ExportPaths> {
        self.export(&run.equity_curve, &run.trades, run.initial_capital, progress)
    }
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
