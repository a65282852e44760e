//! Completed trade records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

use super::{Bar, OpenPosition};

/// A completed entry/exit round trip.
///
/// Created only when an open position is closed; the entry always strictly
/// precedes the exit and both prices are positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Timestamp of the entry bar (unix milliseconds)
    pub entry_timestamp: i64,
    /// Timestamp of the exit bar (unix milliseconds)
    pub exit_timestamp: i64,
    /// Close price of the entry bar
    pub entry_price: f64,
    /// Close price of the exit bar
    pub exit_price: f64,
    /// Realized return, `(exit_price - entry_price) / entry_price`
    pub return_fraction: f64,
}

impl Trade {
    pub(crate) fn close(
        position: &OpenPosition,
        bar: &Bar,
    ) -> Result<Self, SimulationError> {
        let return_fraction = position.unrealized_return(bar.close)?;
        Ok(Self {
            entry_timestamp: position.entry_timestamp,
            exit_timestamp: bar.timestamp,
            entry_price: position.entry_price,
            exit_price: bar.close,
            return_fraction,
        })
    }

    /// Whether the trade closed above its entry price.
    pub fn is_winner(&self) -> bool {
        self.return_fraction > 0.0
    }

    /// Entry timestamp as a DateTime.
    pub fn entry_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.entry_timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }

    /// Exit timestamp as a DateTime.
    pub fn exit_datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.exit_timestamp)
            .unwrap_or_else(|| DateTime::from_timestamp(0, 0).unwrap())
    }
}
