//! Core data types for the backtesting toolkit.

mod bar;
mod position;
mod signal;
mod trade;

pub use bar::{Bar, BarSeries};
pub use position::{Decision, OpenPosition, PositionState, Transition};
pub use signal::{Signal, SignalSeries};
pub use trade::Trade;
