use serde::{Deserialize, Serialize};

/// Grouping key used when an event carries no strategy.
pub const UNKNOWN_STRATEGY: &str = "Unknown";

/// Whether an event opens or closes a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Entry,
    Exit,
}

/// One entry or exit from a completed strategy run.
///
/// `strategy` and `pnl` are optional on the wire. They are never validated;
/// the accessors below supply the defaults (`"Unknown"` and `0.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeEvent {
    /// Nanoseconds since the Unix epoch.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
    /// Signed position size delta.
    pub size: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
}

impl TradeEvent {
    pub fn entry(timestamp: i64, strategy: impl Into<String>, size: f64) -> Self {
        Self {
            timestamp,
            kind: EventKind::Entry,
            strategy: Some(strategy.into()),
            size,
            pnl: None,
        }
    }

    pub fn exit(timestamp: i64, strategy: impl Into<String>, size: f64, pnl: f64) -> Self {
        Self {
            timestamp,
            kind: EventKind::Exit,
            strategy: Some(strategy.into()),
            size,
            pnl: Some(pnl),
        }
    }

    /// Strategy key, `"Unknown"` when absent.
    pub fn strategy_key(&self) -> &str {
        self.strategy.as_deref().unwrap_or(UNKNOWN_STRATEGY)
    }

    /// Realized P&L, `0.0` when absent.
    pub fn realized_pnl(&self) -> f64 {
        self.pnl.unwrap_or(0.0)
    }

    pub fn is_exit(&self) -> bool {
        self.kind == EventKind::Exit
    }
}
