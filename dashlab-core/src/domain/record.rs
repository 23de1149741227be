use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ids::BasketId;

/// Summary of one closed basket, emitted on every exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketRecord {
    /// UTC day of the exit.
    pub date: NaiveDate,
    pub net_pnl: f64,
    /// Seconds since the strategy's most recent entry, never below 0.001.
    pub duration_seconds: f64,
}

/// One row of the flat trade log, emitted for every event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeLogRecord {
    pub basket_id: BasketId,
    /// 1-based position in the emitted log.
    pub trade_num: usize,
    pub lot_size: f64,
    pub slippage_pips: f64,
}

/// A dated point of the equity series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub total_equity: f64,
    pub capital: f64,
}

/// One equity-curve sample as recorded by the strategy runner.
///
/// Older runs record bare values, one per day. Newer runs can attach the
/// sample's own timestamp (nanoseconds since epoch).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EquitySample {
    Value(f64),
    Dated { timestamp: i64, equity: f64 },
}

impl EquitySample {
    pub fn equity(&self) -> f64 {
        match *self {
            EquitySample::Value(v) => v,
            EquitySample::Dated { equity, .. } => equity,
        }
    }

    pub fn timestamp(&self) -> Option<i64> {
        match *self {
            EquitySample::Value(_) => None,
            EquitySample::Dated { timestamp, .. } => Some(timestamp),
        }
    }
}

impl From<f64> for EquitySample {
    fn from(value: f64) -> Self {
        EquitySample::Value(value)
    }
}
