//! Command implementations.

pub mod backtest;
pub mod signals;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;

use quantbt_config::{load_config, AppConfig};
use quantbt_core::traits::DataSource;
use quantbt_core::types::BarSeries;
use quantbt_data::CsvDataSource;
use quantbt_indicators::rsi_column;

/// Load the app configuration, falling back to defaults when the file is
/// absent so CLI flags alone can drive a run.
pub(crate) fn load_app_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        load_config(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        Ok(AppConfig::default())
    }
}

fn parse_date(label: &str, value: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid {label} date: {value}"))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

/// Load bars, optionally windowed to a date range, and attach the
/// oscillator column.
pub(crate) async fn load_annotated_series(
    data_path: &Path,
    symbol: &str,
    start: Option<&str>,
    end: Option<&str>,
    rsi_period: usize,
) -> Result<BarSeries> {
    let source = CsvDataSource::new(data_path).with_context(|| {
        format!(
            "Data path '{}' does not exist. Provide a CSV file with date and close columns",
            data_path.display()
        )
    })?;

    let series = if start.is_none() && end.is_none() {
        source.load_series(symbol)?
    } else {
        let start = match start {
            Some(value) => parse_date("start", value)?,
            None => DateTime::from_timestamp(0, 0).unwrap(),
        };
        let end = match end {
            Some(value) => parse_date("end", value)?,
            None => Utc::now(),
        };
        let bars = source.get_historical_bars(symbol, start, end).await?;
        BarSeries::from_bars(symbol, bars)?
    };

    let column = rsi_column(&series.closes(), rsi_period);
    Ok(series.with_oscillator(&column)?)
}
