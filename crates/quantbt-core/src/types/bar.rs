//! Price bar types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

/// One time-indexed price observation.
///
/// The oscillator value is computed externally and attached per bar; it is
/// `None` during the indicator's warm-up window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Closing price
    pub close: f64,
    /// Externally computed oscillator value, if defined for this bar
    pub oscillator: Option<f64>,
}

impl Bar {
    /// Create a new bar with no oscillator value.
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self {
            timestamp,
            close,
            oscillator: None,
        }
    }

    /// Attach an oscillator value.
    pub fn with_oscillator(mut self, value: f64) -> Self {
        self.oscillator = Some(value);
        self
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }
}

/// Validated, time-ordered container of bars.
///
/// Construction is the single validation point for the raw table: a series
/// that exists is non-empty, strictly increasing in time, and carries only
/// finite positive closing prices. Nothing downstream re-checks these.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    /// Build a series from raw bars, validating the simulation preconditions.
    pub fn from_bars(
        symbol: impl Into<String>,
        bars: Vec<Bar>,
    ) -> Result<Self, SimulationError> {
        if bars.is_empty() {
            return Err(SimulationError::EmptySeries);
        }

        for bar in &bars {
            if !bar.close.is_finite() || bar.close <= 0.0 {
                return Err(SimulationError::InvalidPrice {
                    price: bar.close,
                    timestamp: bar.timestamp,
                });
            }
        }

        for (index, pair) in bars.windows(2).enumerate() {
            if pair[1].timestamp <= pair[0].timestamp {
                return Err(SimulationError::UnorderedSeries {
                    index: index + 1,
                    previous: pair[0].timestamp,
                    current: pair[1].timestamp,
                });
            }
        }

        Ok(Self {
            symbol: symbol.into(),
            bars,
        })
    }

    /// Replace the oscillator column, one optional value per bar.
    pub fn with_oscillator(
        mut self,
        values: &[Option<f64>],
    ) -> Result<Self, SimulationError> {
        if values.len() != self.bars.len() {
            return Err(SimulationError::LengthMismatch {
                signals: values.len(),
                bars: self.bars.len(),
            });
        }
        for (bar, value) in self.bars.iter_mut().zip(values) {
            bar.oscillator = *value;
        }
        Ok(self)
    }

    /// Symbol this series describes.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// Get the number of bars.
    #[inline]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// A constructed series is never empty; kept for the usual pairing.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Get a bar by index (0 = oldest).
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    /// Get the last bar.
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Get all bars as a slice.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// Extract close prices as a vector.
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Get an iterator over the bars.
    pub fn iter(&self) -> impl Iterator<Item = &Bar> {
        self.bars.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_series() {
        let series = BarSeries::from_bars(
            "TEST",
            vec![Bar::new(1, 10.0), Bar::new(2, 11.0), Bar::new(3, 9.5)],
        )
        .unwrap();

        assert_eq!(series.len(), 3);
        assert_eq!(series.closes(), vec![10.0, 11.0, 9.5]);
        assert_eq!(series.last().unwrap().timestamp, 3);
    }

    #[test]
    fn test_empty_series_rejected() {
        let result = BarSeries::from_bars("TEST", vec![]);
        assert!(matches!(result, Err(SimulationError::EmptySeries)));
    }

    #[test]
    fn test_unordered_series_rejected() {
        let result =
            BarSeries::from_bars("TEST", vec![Bar::new(2, 10.0), Bar::new(1, 11.0)]);
        assert!(matches!(
            result,
            Err(SimulationError::UnorderedSeries { index: 1, .. })
        ));
    }

    #[test]
    fn test_duplicate_timestamp_rejected() {
        let result =
            BarSeries::from_bars("TEST", vec![Bar::new(1, 10.0), Bar::new(1, 11.0)]);
        assert!(matches!(
            result,
            Err(SimulationError::UnorderedSeries { .. })
        ));
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        for bad in [0.0, -4.2, f64::NAN, f64::INFINITY] {
            let result = BarSeries::from_bars("TEST", vec![Bar::new(1, bad)]);
            assert!(matches!(
                result,
                Err(SimulationError::InvalidPrice { .. })
            ));
        }
    }

    #[test]
    fn test_with_oscillator_alignment() {
        let series = BarSeries::from_bars(
            "TEST",
            vec![Bar::new(1, 10.0), Bar::new(2, 11.0)],
        )
        .unwrap();

        let series = series
            .with_oscillator(&[None, Some(42.0)])
            .unwrap();
        assert_eq!(series.get(0).unwrap().oscillator, None);
        assert_eq!(series.get(1).unwrap().oscillator, Some(42.0));

        let series = BarSeries::from_bars("TEST", vec![Bar::new(1, 10.0)]).unwrap();
        assert!(matches!(
            series.with_oscillator(&[None, None]),
            Err(SimulationError::LengthMismatch { signals: 2, bars: 1 })
        ));
    }
}
