//! Basket aggregation — folds a completed entry/exit stream into basket summaries and a trade log.
//!
//! Events are stable-sorted by timestamp, then scanned once left to right.
//! Per strategy the only state kept is the timestamp of the most recent
//! entry:
//!
//! ```text
//! NoOpenEntry --entry--> EntrySeen --exit--> NoOpenEntry
//! ```
//!
//! An exit seen in `NoOpenEntry` is accepted and measured from its own
//! timestamp. A second entry in `EntrySeen` replaces the stored timestamp;
//! open positions are not stacked. The stored entry is not cleared by an
//! exit, so a later exit with no new entry measures from the same entry.
//!
//! Every event gets a trade-log row tagged with the basket id of the cycle it
//! belongs to; every exit closes a basket, emits a summary row, and advances
//! the basket sequence number.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{utc_date, BasketId, BasketRecord, TradeEvent, TradeLogRecord};

/// Shortest duration reported for a basket, in seconds.
pub const MIN_DURATION_SECS: f64 = 0.001;

/// Slippage placeholder written to every trade-log row.
pub const DEFAULT_SLIPPAGE_PIPS: f64 = 0.5;

const NANOS_PER_SEC: f64 = 1e9;

/// How basket sequence numbers are shared between strategies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BasketCounterScope {
    /// One counter for the whole stream; any exit advances it.
    #[default]
    Global,
    /// Each strategy numbers its own baskets from 1.
    PerStrategy,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    #[serde(default)]
    pub counter_scope: BasketCounterScope,
    #[serde(default = "default_slippage_pips")]
    pub slippage_pips: f64,
}

fn default_slippage_pips() -> f64 {
    DEFAULT_SLIPPAGE_PIPS
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            counter_scope: BasketCounterScope::Global,
            slippage_pips: DEFAULT_SLIPPAGE_PIPS,
        }
    }
}

/// Output of one aggregation pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    /// One per exit, in processing order.
    pub baskets: Vec<BasketRecord>,
    /// One per input event, in processing order.
    pub trade_log: Vec<TradeLogRecord>,
    /// Sequence number the next basket would receive (global scope), or the
    /// highest next number across strategies (per-strategy scope).
    pub next_sequence: u64,
}

#[derive(Debug, Clone, Default)]
pub struct BasketAggregator {
    config: AggregatorConfig,
}

impl BasketAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    /// Aggregate a complete, possibly unordered, event list.
    pub fn aggregate(&self, events: &[TradeEvent]) -> Aggregation {
        let mut sorted: Vec<&TradeEvent> = events.iter().collect();
        // Stable: events sharing a timestamp keep their input order.
        sorted.sort_by_key(|e| e.timestamp);

        let mut last_entry: HashMap<&str, i64> = HashMap::new();
        let mut counter = SequenceCounter::new(self.config.counter_scope);
        let mut baskets = Vec::new();
        let mut trade_log = Vec::with_capacity(sorted.len());

        for event in sorted {
            let date = utc_date(event.timestamp);
            let strategy = event.strategy_key();

            if !event.is_exit() {
                last_entry.insert(strategy, event.timestamp);
            }

            let basket_id = BasketId::new(strategy, date, counter.current(strategy));
            trace!(%basket_id, kind = ?event.kind, "event");

            trade_log.push(TradeLogRecord {
                basket_id,
                trade_num: trade_log.len() + 1,
                lot_size: event.size.abs(),
                slippage_pips: self.config.slippage_pips,
            });

            if event.is_exit() {
                let entry_ts = last_entry.get(strategy).copied().unwrap_or(event.timestamp);
                baskets.push(BasketRecord {
                    date,
                    net_pnl: event.realized_pnl(),
                    duration_seconds: duration_seconds(entry_ts, event.timestamp),
                });
                counter.advance(strategy);
            }
        }

        debug!(
            events = trade_log.len(),
            baskets = baskets.len(),
            strategies = last_entry.len(),
            "aggregated trade events"
        );

        Aggregation {
            baskets,
            trade_log,
            next_sequence: counter.max_current(),
        }
    }
}

/// Elapsed seconds from `entry_ts` to `exit_ts`, floored at `MIN_DURATION_SECS`.
pub fn duration_seconds(entry_ts: i64, exit_ts: i64) -> f64 {
    let elapsed_ns = i128::from(exit_ts) - i128::from(entry_ts);
    (elapsed_ns as f64 / NANOS_PER_SEC).max(MIN_DURATION_SECS)
}

/// Basket sequence numbers, starting at 1.
#[derive(Debug)]
enum SequenceCounter<'a> {
    Global(u64),
    PerStrategy(HashMap<&'a str, u64>),
}

impl<'a> SequenceCounter<'a> {
    fn new(scope: BasketCounterScope) -> Self {
        match scope {
            BasketCounterScope::Global => SequenceCounter::Global(1),
            BasketCounterScope::PerStrategy => SequenceCounter::PerStrategy(HashMap::new()),
        }
    }

    fn current(&self, strategy: &str) -> u64 {
        match self {
            SequenceCounter::Global(n) => *n,
            SequenceCounter::PerStrategy(map) => map.get(strategy).copied().unwrap_or(1),
        }
    }

    fn advance(&mut self, strategy: &'a str) {
        match self {
            SequenceCounter::Global(n) => *n += 1,
            SequenceCounter::PerStrategy(map) => *map.entry(strategy).or_insert(1) += 1,
        }
    }

    fn max_current(&self) -> u64 {
        match self {
            SequenceCounter::Global(n) => *n,
            SequenceCounter::PerStrategy(map) => map.values().copied().max().unwrap_or(1),
        }
    }
}
