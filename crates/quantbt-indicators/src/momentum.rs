//! Momentum indicators.

use quantbt_core::traits::Indicator;

/// Relative Strength Index (RSI).
///
/// Measures the speed and magnitude of recent price changes
/// to evaluate overbought or oversold conditions. Uses Wilder's
/// smoothing; the first output corresponds to input index `period`.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    ///
    /// Common periods are 14 (default) or 9.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;

        // Seed the averages with a simple mean over the first `period`
        // price changes
        let mut avg_gain = 0.0;
        let mut avg_loss = 0.0;
        for pair in data.windows(2).take(self.period) {
            let change = pair[1] - pair[0];
            if change > 0.0 {
                avg_gain += change;
            } else {
                avg_loss -= change;
            }
        }
        avg_gain /= period_f64;
        avg_loss /= period_f64;

        let mut result = Vec::with_capacity(data.len() - self.period);
        result.push(Self::rsi_value(avg_gain, avg_loss));

        // Wilder's smoothing: avg = (prev_avg * (period-1) + change) / period
        for pair in data.windows(2).skip(self.period) {
            let change = pair[1] - pair[0];
            let (gain, loss) = if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            };
            avg_gain = (avg_gain * (period_f64 - 1.0) + gain) / period_f64;
            avg_loss = (avg_loss * (period_f64 - 1.0) + loss) / period_f64;
            result.push(Self::rsi_value(avg_gain, avg_loss));
        }

        result
    }

    fn period(&self) -> usize {
        self.period + 1 // Need period+1 data points
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// RSI values aligned to the input closes, one optional value per close.
///
/// The first `period` entries are `None`: the indicator is undefined during
/// its warm-up window, and an undefined value must never look like a real
/// reading downstream.
pub fn rsi_column(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let values = Rsi::new(period).calculate(closes);
    let warmup = closes.len() - values.len();

    let mut column: Vec<Option<f64>> = Vec::with_capacity(closes.len());
    column.resize(warmup, None);
    column.extend(values.into_iter().map(Some));
    column
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_basic() {
        let rsi = Rsi::new(14);
        // Alternating up/down moves
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), data.len() - 14);

        // All RSI values should be between 0 and 100
        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        // All gains = RSI should be 100
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let data = vec![7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];
        let result = rsi.calculate(&data);

        assert!(!result.is_empty());
        // All losses = RSI should be 0
        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_insufficient_data() {
        let rsi = Rsi::new(14);
        let data = vec![1.0; 10];
        assert!(rsi.calculate(&data).is_empty());
    }

    #[test]
    fn test_column_alignment() {
        let closes: Vec<f64> = (0..10).map(|i| 100.0 + i as f64).collect();
        let column = rsi_column(&closes, 5);

        assert_eq!(column.len(), closes.len());
        // Warm-up window is undefined
        for value in &column[..5] {
            assert!(value.is_none());
        }
        // Defined from the first bar the indicator covers
        for value in &column[5..] {
            assert!(value.is_some());
        }
    }

    #[test]
    fn test_column_all_none_when_too_short() {
        let closes = vec![100.0, 101.0, 102.0];
        let column = rsi_column(&closes, 14);

        assert_eq!(column.len(), 3);
        assert!(column.iter().all(Option::is_none));
    }
}
