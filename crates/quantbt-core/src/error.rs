//! Error types for the backtesting toolkit.

use thiserror::Error;

/// Top-level backtest error.
#[derive(Error, Debug)]
pub enum BacktestError {
    #[error("Simulation error: {0}")]
    Simulation(#[from] SimulationError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by signal generation and trade replay.
///
/// These are precondition violations and are fatal to a run: no partial
/// signal series or trade list is ever returned.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Bar series is empty")]
    EmptySeries,

    #[error("Bars out of order at index {index}: timestamp {current} does not follow {previous}")]
    UnorderedSeries {
        index: usize,
        previous: i64,
        current: i64,
    },

    #[error("Invalid price {price} at timestamp {timestamp}")]
    InvalidPrice { price: f64, timestamp: i64 },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Signal column has {signals} entries for {bars} bars")]
    LengthMismatch { signals: usize, bars: usize },
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid series: {0}")]
    InvalidSeries(#[from] SimulationError),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need {required} points, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type alias for backtest operations.
pub type BacktestResult<T> = Result<T, BacktestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simulation_error_display() {
        let error = SimulationError::InvalidPrice {
            price: 0.0,
            timestamp: 42,
        };
        assert_eq!(error.to_string(), "Invalid price 0 at timestamp 42");

        let error = SimulationError::LengthMismatch { signals: 2, bars: 3 };
        assert_eq!(error.to_string(), "Signal column has 2 entries for 3 bars");
    }

    #[test]
    fn test_error_conversions() {
        let error = BacktestError::from(SimulationError::EmptySeries);
        assert!(matches!(
            error,
            BacktestError::Simulation(SimulationError::EmptySeries)
        ));

        let error: BacktestError = DataError::NoDataAvailable.into();
        assert!(matches!(error, BacktestError::Data(_)));

        // A series-level failure surfaces through the data layer unchanged
        let error: DataError = SimulationError::EmptySeries.into();
        assert_eq!(
            error.to_string(),
            "Invalid series: Bar series is empty"
        );
    }
}
