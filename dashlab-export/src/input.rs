//! Run input — the equity curve and trade events of a completed strategy run.

use std::path::{Path, PathBuf};

use dashlab_core::{EquitySample, TradeEvent};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("failed to read run file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid run JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A completed run as recorded by the strategy runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    pub initial_capital: f64,
    #[serde(default)]
    pub equity_curve: Vec<EquitySample>,
    #[serde(default)]
    pub trades: Vec<TradeEvent>,
}

impl RunRecord {
    pub fn from_json(json: &str) -> Result<Self, InputError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, InputError> {
        let json = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }
}
