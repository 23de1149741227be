//! Dashlab Core — domain types and the two pure transforms behind the dashboard export.
//!
//! This crate contains:
//! - Domain types (trade events, basket ids, basket and trade-log records, equity points)
//! - Basket aggregation: one pass over a completed trade history
//! - Equity series construction with a daily-index fallback for undated samples
//!
//! Nothing here performs I/O; file writing lives in `dashlab-export`.

pub mod basket;
pub mod domain;
pub mod equity;

pub use basket::{Aggregation, AggregatorConfig, BasketAggregator, BasketCounterScope};
pub use domain::{
    BasketId, BasketRecord, EquityPoint, EquitySample, EventKind, TradeEvent, TradeLogRecord,
    UNKNOWN_STRATEGY,
};
pub use equity::{EquityConfig, EquitySeriesBuilder};
