//! Domain types for dashlab

pub mod event;
pub mod ids;
pub mod record;

pub use event::{EventKind, TradeEvent, UNKNOWN_STRATEGY};
pub use ids::BasketId;
pub use record::{BasketRecord, EquityPoint, EquitySample, TradeLogRecord};

use chrono::{DateTime, NaiveDate, Utc};

/// UTC calendar day of a nanosecond epoch timestamp.
pub fn utc_date(timestamp_ns: i64) -> NaiveDate {
    DateTime::<Utc>::from_timestamp_nanos(timestamp_ns).date_naive()
}
