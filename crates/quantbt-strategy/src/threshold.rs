//! Oscillator-threshold entry with profit-target / stop-loss exit.
//!
//! Enters long when the oscillator drops below the configured threshold,
//! exits when the position's return reaches the profit target or falls
//! through the stop loss.

use serde::{Deserialize, Serialize};
use tracing::debug;

use quantbt_core::error::SimulationError;
use quantbt_core::types::{
    Bar, BarSeries, Decision, OpenPosition, PositionState, Signal, SignalSeries,
};

/// Configuration for the threshold signal generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalConfig {
    /// Oscillator value below which an entry is triggered (e.g. 35 for an
    /// oversold RSI)
    pub oscillator_threshold: f64,
    /// Target profit level as a return fraction (e.g. 0.05 for 5%)
    pub profit_target: f64,
    /// Maximum tolerable loss as a return fraction (e.g. 0.02 for 2%)
    pub stop_loss: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            oscillator_threshold: 35.0,
            profit_target: 0.05,
            stop_loss: 0.02,
        }
    }
}

impl SignalConfig {
    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.profit_target.is_finite() || self.profit_target <= 0.0 {
            return Err(SimulationError::InvalidParameter(
                "profit target must be a positive fraction".into(),
            ));
        }
        if !self.stop_loss.is_finite() || self.stop_loss <= 0.0 {
            return Err(SimulationError::InvalidParameter(
                "stop loss must be a positive fraction".into(),
            ));
        }
        if !(0.0..=100.0).contains(&self.oscillator_threshold) {
            return Err(SimulationError::InvalidParameter(
                "oscillator threshold must be within the indicator range 0..=100".into(),
            ));
        }
        Ok(())
    }
}

/// Converts a bar series with oscillator values into entry/exit signals.
pub struct SignalGenerator {
    config: SignalConfig,
}

impl SignalGenerator {
    /// Create a generator with a validated configuration.
    pub fn new(config: SignalConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SignalConfig {
        &self.config
    }

    /// One decision per bar, from the oscillator when flat and from the
    /// position's return when invested.
    fn decide(
        &self,
        position: Option<&OpenPosition>,
        bar: &Bar,
    ) -> Result<Decision, SimulationError> {
        let decision = match position {
            None => {
                // An undefined oscillator never satisfies the entry
                // comparison; a NaN reading compares false as well.
                if bar
                    .oscillator
                    .is_some_and(|value| value < self.config.oscillator_threshold)
                {
                    Decision::Open
                } else {
                    Decision::Stay
                }
            }
            Some(open) => {
                let change = open.unrealized_return(bar.close)?;
                // The profit target is evaluated before the stop loss; a
                // degenerate configuration that satisfies both on one bar
                // exits on the target.
                if change >= self.config.profit_target || change <= -self.config.stop_loss {
                    Decision::Close
                } else {
                    Decision::Stay
                }
            }
        };
        Ok(decision)
    }

    /// Annotate a bar series with one signal per bar.
    ///
    /// Single forward pass. The first bar is always `Hold`: the state
    /// machine needs a prior bar to compare against. A position opened at
    /// bar `i` can exit no earlier than bar `i + 1`.
    pub fn generate(&self, series: &BarSeries) -> Result<SignalSeries, SimulationError> {
        let mut state = PositionState::new();
        let mut signals = Vec::with_capacity(series.len());
        signals.push(Signal::Hold);

        for bar in series.iter().skip(1) {
            let decision = self.decide(state.position(), bar)?;
            let transition = state.advance(bar, decision)?;
            signals.push(transition.signal());
        }

        debug!(
            symbol = series.symbol(),
            bars = series.len(),
            entries = signals.iter().filter(|s| **s == Signal::Enter).count(),
            "generated signal series"
        );

        SignalSeries::new(series.clone(), signals)
    }
}
