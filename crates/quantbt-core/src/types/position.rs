//! Position bookkeeping shared by signal generation and trade replay.
//!
//! Both passes over a series drive the same transition function, so the
//! two stages cannot drift apart: the generator decides from the
//! oscillator and exit thresholds, the simulator decides from the
//! recorded signal column.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

use super::{Bar, Signal, Trade};

/// What a decision policy wants to do on the current bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Open a long position at this bar's close
    Open,
    /// Close the open position at this bar's close
    Close,
    /// Leave the state untouched
    Stay,
}

impl From<Signal> for Decision {
    /// The decision a recorded signal replays to.
    fn from(signal: Signal) -> Self {
        match signal {
            Signal::Enter => Decision::Open,
            Signal::Exit => Decision::Close,
            Signal::Hold => Decision::Stay,
        }
    }
}

/// Outcome of advancing the position state by one bar.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// A position was opened on this bar
    Opened,
    /// The open position was closed on this bar, completing a trade
    Closed(Trade),
    /// Nothing changed
    Held,
    /// Open requested while a position was already open; not applied
    IgnoredOpen,
    /// Close requested while no position was open; not applied
    IgnoredClose,
}

impl Transition {
    /// The signal recorded for a bar that produced this transition.
    pub fn signal(&self) -> Signal {
        match self {
            Transition::Opened => Signal::Enter,
            Transition::Closed(_) => Signal::Exit,
            Transition::Held | Transition::IgnoredOpen | Transition::IgnoredClose => {
                Signal::Hold
            }
        }
    }
}

/// An open long position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenPosition {
    /// Timestamp of the entry bar
    pub entry_timestamp: i64,
    /// Close price of the entry bar
    pub entry_price: f64,
}

impl OpenPosition {
    fn open_at(bar: &Bar) -> Result<Self, SimulationError> {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(SimulationError::InvalidPrice {
                price: bar.close,
                timestamp: bar.timestamp,
            });
        }
        Ok(Self {
            entry_timestamp: bar.timestamp,
            entry_price: bar.close,
        })
    }

    /// Fractional return of closing this position at `close`.
    ///
    /// The entry price is checked again so a state built from external
    /// data can never turn the division into an infinity.
    pub fn unrealized_return(&self, close: f64) -> Result<f64, SimulationError> {
        if !self.entry_price.is_finite() || self.entry_price <= 0.0 {
            return Err(SimulationError::InvalidPrice {
                price: self.entry_price,
                timestamp: self.entry_timestamp,
            });
        }
        Ok((close - self.entry_price) / self.entry_price)
    }
}

/// State machine tracking at most one open long position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PositionState {
    open: Option<OpenPosition>,
}

impl PositionState {
    /// Start flat.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a position is currently open.
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// The open position, if any.
    pub fn position(&self) -> Option<&OpenPosition> {
        self.open.as_ref()
    }

    /// Advance the state by one bar.
    ///
    /// At most one position is open at any time, and a decision that does
    /// not apply to the current state is reported as ignored, never
    /// applied. A position opened on a bar can only close on a later call,
    /// so entry and exit are mutually exclusive per bar.
    pub fn advance(
        &mut self,
        bar: &Bar,
        decision: Decision,
    ) -> Result<Transition, SimulationError> {
        match (decision, self.open) {
            (Decision::Open, None) => {
                self.open = Some(OpenPosition::open_at(bar)?);
                Ok(Transition::Opened)
            }
            (Decision::Open, Some(_)) => Ok(Transition::IgnoredOpen),
            (Decision::Close, Some(position)) => {
                let trade = Trade::close(&position, bar)?;
                self.open = None;
                Ok(Transition::Closed(trade))
            }
            (Decision::Close, None) => Ok(Transition::IgnoredClose),
            (Decision::Stay, _) => Ok(Transition::Held),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_then_close() {
        let mut state = PositionState::new();
        assert!(!state.is_open());

        let transition = state.advance(&Bar::new(1, 9.0), Decision::Open).unwrap();
        assert_eq!(transition, Transition::Opened);
        assert_eq!(transition.signal(), Signal::Enter);
        assert_eq!(state.position().unwrap().entry_price, 9.0);

        let transition = state.advance(&Bar::new(2, 12.0), Decision::Close).unwrap();
        match transition {
            Transition::Closed(trade) => {
                assert_eq!(trade.entry_timestamp, 1);
                assert_eq!(trade.exit_timestamp, 2);
                assert!((trade.return_fraction - (12.0 - 9.0) / 9.0).abs() < 1e-12);
            }
            other => panic!("expected Closed, got {other:?}"),
        }
        assert!(!state.is_open());
    }

    #[test]
    fn test_second_open_is_ignored() {
        let mut state = PositionState::new();
        state.advance(&Bar::new(1, 9.0), Decision::Open).unwrap();

        let transition = state.advance(&Bar::new(2, 10.0), Decision::Open).unwrap();
        assert_eq!(transition, Transition::IgnoredOpen);
        assert_eq!(transition.signal(), Signal::Hold);
        // The original entry is untouched
        assert_eq!(state.position().unwrap().entry_price, 9.0);
    }

    #[test]
    fn test_close_while_flat_is_ignored() {
        let mut state = PositionState::new();
        let transition = state.advance(&Bar::new(1, 9.0), Decision::Close).unwrap();
        assert_eq!(transition, Transition::IgnoredClose);
        assert!(!state.is_open());
    }

    #[test]
    fn test_open_at_invalid_price_fails() {
        let mut state = PositionState::new();
        let result = state.advance(&Bar::new(1, 0.0), Decision::Open);
        assert!(matches!(
            result,
            Err(SimulationError::InvalidPrice {
                price,
                timestamp: 1
            }) if price == 0.0
        ));
        assert!(!state.is_open());
    }

    #[test]
    fn test_zero_entry_price_never_divides() {
        let position = OpenPosition {
            entry_timestamp: 1,
            entry_price: 0.0,
        };
        let result = position.unrealized_return(12.0);
        assert!(matches!(result, Err(SimulationError::InvalidPrice { .. })));
    }
}
