//! Trading signal types.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

use super::{Bar, BarSeries};

/// Per-bar trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Open a long position at this bar's close
    Enter,
    /// Close the open position at this bar's close
    Exit,
    /// No action
    Hold,
}

impl Signal {
    /// Whether this signal requests an action.
    pub fn is_action(&self) -> bool {
        !matches!(self, Signal::Hold)
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Enter => write!(f, "enter"),
            Signal::Exit => write!(f, "exit"),
            Signal::Hold => write!(f, "hold"),
        }
    }
}

/// A bar series annotated with exactly one signal per bar.
///
/// Produced once by the signal generator and consumed read-only by the
/// trade simulator.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSeries {
    series: BarSeries,
    signals: Vec<Signal>,
}

impl SignalSeries {
    /// Pair a series with its signal column.
    pub fn new(series: BarSeries, signals: Vec<Signal>) -> Result<Self, SimulationError> {
        if signals.len() != series.len() {
            return Err(SimulationError::LengthMismatch {
                signals: signals.len(),
                bars: series.len(),
            });
        }
        Ok(Self { series, signals })
    }

    /// The underlying bar series.
    pub fn bars(&self) -> &BarSeries {
        &self.series
    }

    /// The signal column.
    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    /// Number of bars (and signals).
    #[inline]
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    /// Iterate bars together with their signals.
    pub fn iter(&self) -> impl Iterator<Item = (&Bar, Signal)> {
        self.series.iter().zip(self.signals.iter().copied())
    }
}
