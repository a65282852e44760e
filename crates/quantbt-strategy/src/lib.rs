//! Signal generation.

mod threshold;

pub use threshold::{SignalConfig, SignalGenerator};
