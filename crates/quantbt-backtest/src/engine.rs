//! Signal replay and trade accounting.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use quantbt_core::error::SimulationError;
use quantbt_core::types::{Decision, PositionState, SignalSeries, Trade, Transition};

/// Result of replaying a signal series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Simulation {
    /// Completed trades, chronological by exit time
    pub trades: Vec<Trade>,
    /// Enter signals observed while a position was already open
    pub ignored_enters: usize,
    /// Exit signals observed while no position was open
    pub ignored_exits: usize,
    /// 1 if the series ended with a position still open (its entry is
    /// dropped, not force-closed), 0 otherwise
    pub open_entries: usize,
}

impl Simulation {
    /// Total signals that did not apply to the position state.
    ///
    /// Nonzero means the signal source violated its contract; the signals
    /// were ignored but a caller can use this to detect the mismatch.
    pub fn ignored_signals(&self) -> usize {
        self.ignored_enters + self.ignored_exits
    }
}

/// Replays a signal series and materializes completed trades.
///
/// The simulator trusts the signal column: it does not re-check the
/// oscillator, only the position state, which it re-derives through the
/// same transition function the generator used.
#[derive(Debug, Clone, Copy, Default)]
pub struct TradeSimulator;

impl TradeSimulator {
    pub fn new() -> Self {
        Self
    }

    /// Replay every bar in order and collect completed trades.
    ///
    /// A position still open when the series ends produces no trade; the
    /// trade list can therefore be one shorter than the Enter count.
    pub fn run(&self, series: &SignalSeries) -> Result<Simulation, SimulationError> {
        let mut state = PositionState::new();
        let mut trades = Vec::new();
        let mut ignored_enters = 0;
        let mut ignored_exits = 0;

        for (bar, signal) in series.iter() {
            match state.advance(bar, Decision::from(signal))? {
                Transition::Opened | Transition::Held => {}
                Transition::Closed(trade) => trades.push(trade),
                Transition::IgnoredOpen => {
                    ignored_enters += 1;
                    warn!(
                        timestamp = bar.timestamp,
                        "ignoring Enter signal while a position is open"
                    );
                }
                Transition::IgnoredClose => {
                    ignored_exits += 1;
                    warn!(
                        timestamp = bar.timestamp,
                        "ignoring Exit signal with no open position"
                    );
                }
            }
        }

        if let Some(position) = state.position() {
            debug!(
                entry_timestamp = position.entry_timestamp,
                entry_price = position.entry_price,
                "series ended with an open position; dropping it unclosed"
            );
        }

        Ok(Simulation {
            trades,
            ignored_enters,
            ignored_exits,
            open_entries: usize::from(state.is_open()),
        })
    }
}
