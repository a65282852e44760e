//! Technical indicators.

mod momentum;

pub use momentum::{rsi_column, Rsi};
