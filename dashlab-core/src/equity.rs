//! Equity series — dated `{date, total_equity, capital}` points from a raw equity curve.
//!
//! Undated samples are placed one calendar day apart starting at
//! `EquityConfig::start_date`, using the sample's index in the curve. Samples
//! that carry their own timestamp use its UTC day instead.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{utc_date, EquityPoint, EquitySample};

/// Reference day for the first undated sample.
pub fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 1, 1).expect("2021-01-01 is a valid date")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityConfig {
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,
}

impl Default for EquityConfig {
    fn default() -> Self {
        Self {
            start_date: default_start_date(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EquitySeriesBuilder {
    config: EquityConfig,
}

impl EquitySeriesBuilder {
    pub fn new(config: EquityConfig) -> Self {
        Self { config }
    }

    /// Build the series from bare values, one per day.
    pub fn build(&self, equity_curve: &[f64], initial_capital: f64) -> Vec<EquityPoint> {
        equity_curve
            .iter()
            .enumerate()
            .map(|(idx, &eq)| EquityPoint {
                date: self.indexed_date(idx),
                total_equity: eq,
                capital: initial_capital,
            })
            .collect()
    }

    /// Build the series from samples that may carry their own timestamps.
    pub fn build_samples(&self, samples: &[EquitySample], initial_capital: f64) -> Vec<EquityPoint> {
        let dated = samples.iter().filter(|s| s.timestamp().is_some()).count();
        debug!(samples = samples.len(), dated, "building equity series");

        samples
            .iter()
            .enumerate()
            .map(|(idx, sample)| EquityPoint {
                date: sample
                    .timestamp()
                    .map(utc_date)
                    .unwrap_or_else(|| self.indexed_date(idx)),
                total_equity: sample.equity(),
                capital: initial_capital,
            })
            .collect()
    }

    fn indexed_date(&self, idx: usize) -> NaiveDate {
        self.config
            .start_date
            .checked_add_days(Days::new(idx as u64))
            .unwrap_or(NaiveDate::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_curve_gives_empty_series() {
        let builder = EquitySeriesBuilder::default();
        assert!(builder.build(&[], 100_000.0).is_empty());
        assert!(builder.build_samples(&[], 100_000.0).is_empty());
    }

    #[test]
    fn one_point_per_day_from_default_start() {
        let builder = EquitySeriesBuilder::default();
        let series = builder.build(&[100_000.0, 100_500.0, 99_750.25], 100_000.0);

        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, day(2021, 1, 1));
        assert_eq!(series[1].date, day(2021, 1, 2));
        assert_eq!(series[2].date, day(2021, 1, 3));
        assert_eq!(series[2].total_equity, 99_750.25);
        assert!(series.iter().all(|p| p.capital == 100_000.0));
    }

    #[test]
    fn crosses_month_and_year_boundaries() {
        let builder = EquitySeriesBuilder::new(EquityConfig {
            start_date: day(2020, 12, 31),
        });
        let series = builder.build(&[1.0; 33], 1.0);
        assert_eq!(series[1].date, day(2021, 1, 1));
        assert_eq!(series[32].date, day(2021, 2, 1));
    }

    #[test]
    fn dated_samples_use_their_own_day() {
        let builder = EquitySeriesBuilder::default();
        let samples = vec![
            EquitySample::Value(10.0),
            EquitySample::Dated {
                timestamp: 1_609_770_600 * 1_000_000_000,
                equity: 11.0,
            },
            EquitySample::Value(12.0),
        ];
        let series = builder.build_samples(&samples, 10.0);

        assert_eq!(series[0].date, day(2021, 1, 1));
        assert_eq!(series[1].date, day(2021, 1, 4));
        // Undated samples keep the index rule even after a dated one.
        assert_eq!(series[2].date, day(2021, 1, 3));
        assert_eq!(series[1].total_equity, 11.0);
    }

    #[test]
    fn bare_values_match_sample_path() {
        let builder = EquitySeriesBuilder::default();
        let values = [5.0, 6.0, 7.0];
        let samples: Vec<EquitySample> = values.iter().copied().map(EquitySample::from).collect();
        assert_eq!(builder.build(&values, 5.0), builder.build_samples(&samples, 5.0));
    }
}
