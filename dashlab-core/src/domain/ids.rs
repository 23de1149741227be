use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Composite basket identifier: strategy, calendar day of the event, basket sequence number.
///
/// Rendered as `{strategy}-{YYYY-MM-DD}-{sequence}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BasketId {
    pub strategy: String,
    pub date: NaiveDate,
    pub sequence: u64,
}

impl BasketId {
    pub fn new(strategy: impl Into<String>, date: NaiveDate, sequence: u64) -> Self {
        Self {
            strategy: strategy.into(),
            date,
            sequence,
        }
    }
}

impl fmt::Display for BasketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.strategy,
            self.date.format("%Y-%m-%d"),
            self.sequence
        )
    }
}
