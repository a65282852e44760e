//! Config validation command.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::warn;

use quantbt_config::load_config;

pub async fn run(config_path: &Path) -> Result<()> {
    let config = load_config(config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    config.strategy.validate()?;

    if !Path::new(&config.data.path).exists() {
        warn!(path = %config.data.path, "configured data file does not exist");
    }

    println!("Configuration OK");
    println!("  symbol:               {}", config.data.symbol);
    println!("  data path:            {}", config.data.path);
    println!("  rsi period:           {}", config.data.rsi_period);
    println!("  oscillator threshold: {}", config.strategy.oscillator_threshold);
    println!("  profit target:        {}", config.strategy.profit_target);
    println!("  stop loss:            {}", config.strategy.stop_loss);
    println!("  position size:        {}", config.report.position_size);

    Ok(())
}
