//! Dashlab Export — turns a completed strategy run into dashboard CSV files.
//!
//! This crate builds on `dashlab-core` to provide:
//! - TOML export configuration
//! - Run input loading (JSON equity curve + trade events)
//! - The exporter writing `equity_curve.csv`, `basket_summary.csv`, `trade_log.csv`
//! - Console progress reporting
//! - Read-back verification of `basket_summary.csv`

pub mod check;
pub mod config;
pub mod export;
pub mod input;
pub mod progress;

pub use check::{check_summary, run_check, CheckError, MonthlyBreakdown, SummaryCheck, Tally};
pub use config::{ConfigError, ExportConfig, OutputConfig};
pub use export::{ExportPaths, Exporter};
pub use input::{InputError, RunRecord};
pub use progress::{ExportProgress, SilentProgress, StdoutProgress};
