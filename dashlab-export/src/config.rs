//! Serializable export configuration.

use std::path::{Path, PathBuf};

use dashlab_core::{AggregatorConfig, EquityConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from loading or validating an export config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Where the CSV files land.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("dashboard_data")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

/// Complete export configuration. Every section is optional in TOML.
///
/// ```toml
/// [output]
/// dir = "dashboard_data"
///
/// [equity]
/// start_date = "2021-01-01"
///
/// [baskets]
/// counter_scope = "global"
/// slippage_pips = 0.5
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub equity: EquityConfig,
    #[serde(default)]
    pub baskets: AggregatorConfig,
}

impl ExportConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: ExportConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("output.dir must not be empty".into()));
        }
        let slip = self.baskets.slippage_pips;
        if !slip.is_finite() || slip < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "baskets.slippage_pips must be finite and >= 0, got {slip}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use dashlab_core::BasketCounterScope;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = ExportConfig::from_toml("").unwrap();
        assert_eq!(config, ExportConfig::default());
        assert_eq!(config.output.dir, PathBuf::from("dashboard_data"));
        assert_eq!(
            config.equity.start_date,
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()
        );
        assert_eq!(config.baskets.counter_scope, BasketCounterScope::Global);
        assert_eq!(config.baskets.slippage_pips, 0.5);
    }

    #[test]
    fn full_toml() {
        let config = ExportConfig::from_toml(
            r#"
[output]
dir = "out/dash"

[equity]
start_date = "2023-06-01"

[baskets]
counter_scope = "per_strategy"
slippage_pips = 0.0
"#,
        )
        .unwrap();
        assert_eq!(config.output.dir, PathBuf::from("out/dash"));
        assert_eq!(
            config.equity.start_date,
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap()
        );
        assert_eq!(config.baskets.counter_scope, BasketCounterScope::PerStrategy);
        assert_eq!(config.baskets.slippage_pips, 0.0);
    }

    #[test]
    fn unknown_scope_is_a_parse_error() {
        let err = ExportConfig::from_toml("[baskets]\ncounter_scope = \"weekly\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn negative_slippage_rejected() {
        let err = ExportConfig::from_toml("[baskets]\nslippage_pips = -1.0").unwrap_err();
        assert!(err.to_string().contains("slippage_pips"));
    }

    #[test]
    fn empty_output_dir_rejected() {
        let err = ExportConfig::from_toml("[output]\ndir = \"\"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ExportConfig::from_file(Path::new("/nonexistent/dashlab.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/dashlab.toml"));
    }
}
