//! Read-back verification of `basket_summary.csv`.
//!
//! Tallies winning (`net_pnl > 0`) and losing (`net_pnl <= 0`) baskets and
//! sums `net_pnl` per calendar month of the `date` column. A file without a
//! `date` column still gets its totals; only the monthly section is skipped.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::{Datelike, NaiveDate};
use thiserror::Error;
use tracing::{debug, warn};

const WIDE_RULE: &str = "==================================================";
const THIN_RULE: &str = "--------------------------------------------------";
const MONTH_RULE: &str = "-----------------------------------";

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error("column '{0}' not found")]
    MissingColumn(&'static str),
    #[error("line {line}: invalid net_pnl '{value}'")]
    InvalidNumber { line: u64, value: String },
    #[error("line {line}: invalid date '{value}'")]
    InvalidDate { line: u64, value: String },
}

/// Count and sum of `net_pnl` over a set of rows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Tally {
    pub count: usize,
    pub sum: f64,
}

impl Tally {
    fn add(&mut self, pnl: f64) {
        self.count += 1;
        self.sum += pnl;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum MonthlyBreakdown {
    /// `((year, month), net_pnl)` ascending by month, only months with rows.
    Months(Vec<((i32, u32), f64)>),
    MissingDateColumn,
    /// A `date` value failed to parse; carries the error text.
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryCheck {
    pub winners: Tally,
    pub losers: Tally,
    pub total: Tally,
    pub monthly: MonthlyBreakdown,
}

/// Read and tally a basket summary file.
pub fn check_summary(path: &Path) -> Result<SummaryCheck, CheckError> {
    if !path.exists() {
        return Err(CheckError::NotFound(path.to_path_buf()));
    }

    let mut rdr = csv::Reader::from_path(path)?;
    let headers = rdr.headers()?.clone();
    let pnl_idx = headers
        .iter()
        .position(|h| h.trim() == "net_pnl")
        .ok_or(CheckError::MissingColumn("net_pnl"))?;
    let date_idx = headers.iter().position(|h| h.trim() == "date");

    let mut winners = Tally::default();
    let mut losers = Tally::default();
    let mut total = Tally::default();
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    // First unparseable date; totals keep accumulating past it.
    let mut date_error: Option<CheckError> = None;

    for record in rdr.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let raw = record.get(pnl_idx).unwrap_or("").trim();
        let pnl: f64 = raw.parse().map_err(|_| CheckError::InvalidNumber {
            line,
            value: raw.to_string(),
        })?;

        if pnl > 0.0 {
            winners.add(pnl);
        } else {
            losers.add(pnl);
        }
        total.add(pnl);

        if let Some(idx) = date_idx.filter(|_| date_error.is_none()) {
            let raw = record.get(idx).unwrap_or("").trim();
            match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                Ok(date) => *months.entry((date.year(), date.month())).or_insert(0.0) += pnl,
                Err(_) => {
                    date_error = Some(CheckError::InvalidDate {
                        line,
                        value: raw.to_string(),
                    })
                }
            }
        }
    }

    let monthly = match (date_idx, date_error) {
        (None, _) => {
            warn!(path = %path.display(), "no date column, skipping monthly breakdown");
            MonthlyBreakdown::MissingDateColumn
        }
        (Some(_), Some(err)) => {
            warn!(path = %path.display(), %err, "bad date, skipping monthly breakdown");
            MonthlyBreakdown::Invalid(err.to_string())
        }
        (Some(_), None) => MonthlyBreakdown::Months(months.into_iter().collect()),
    };

    debug!(
        rows = total.count,
        winners = winners.count,
        losers = losers.count,
        "checked basket summary"
    );

    Ok(SummaryCheck {
        winners,
        losers,
        total,
        monthly,
    })
}

impl SummaryCheck {
    /// Totals block followed by the monthly breakdown.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Winning Trades: {:5}  |  Total: {}",
            self.winners.count,
            format_money(self.winners.sum)
        );
        let _ = writeln!(
            out,
            "Losing Trades:  {:5}  |  Total: {}",
            self.losers.count,
            format_money(self.losers.sum)
        );
        let _ = writeln!(out, "{THIN_RULE}");
        let _ = writeln!(
            out,
            "NET P&L:        {:5}  |  Value: {}",
            self.total.count,
            format_money(self.total.sum)
        );
        let _ = writeln!(out, "{WIDE_RULE}");

        let _ = writeln!(out, "\nMonthly Returns (Dynamic Calculation):");
        let _ = writeln!(out, "{MONTH_RULE}");
        match &self.monthly {
            MonthlyBreakdown::Months(months) => {
                for ((year, month), pnl) in months {
                    if *pnl != 0.0 {
                        let _ = writeln!(out, "{year:04}-{month:02}: {}", format_money(*pnl));
                    }
                }
            }
            MonthlyBreakdown::MissingDateColumn => {
                let _ = writeln!(out, "Error: 'date' column not found for monthly breakdown.");
            }
            MonthlyBreakdown::Invalid(detail) => {
                let _ = writeln!(out, "Error reading CSV: {detail}");
            }
        }
        let _ = writeln!(out, "{MONTH_RULE}");
        out
    }
}

/// Console text for a full check of `path`, including error outcomes.
///
/// Never fails: a missing or unreadable file becomes a message.
pub fn run_check(path: &Path) -> String {
    match check_summary(path) {
        Err(CheckError::NotFound(p)) => format!("Error: {} not found.\n", p.display()),
        result => {
            let mut out = format!("Checking Results from: {}\n{WIDE_RULE}\n", path.display());
            match result {
                Ok(check) => out.push_str(&check.render()),
                Err(e) => {
                    let _ = writeln!(out, "Error reading CSV: {e}");
                }
            }
            out
        }
    }
}

/// `$1,234.56` style: two decimals, thousands separators, sign after `$`.
pub fn format_money(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}.{frac_part}")
}
