//! Signals command implementation.

use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::info;

use quantbt_strategy::SignalGenerator;

use super::{load_annotated_series, load_app_config};
use crate::cli::SignalsArgs;

pub async fn run(args: SignalsArgs, config_path: &Path) -> Result<()> {
    let config = load_app_config(config_path)?;

    let symbol = args.symbol.unwrap_or(config.data.symbol);
    let data_path = args
        .data
        .unwrap_or_else(|| PathBuf::from(&config.data.path));
    let rsi_period = args.rsi_period.unwrap_or(config.data.rsi_period);

    let mut strategy_config = config.strategy;
    if let Some(threshold) = args.threshold {
        strategy_config.oscillator_threshold = threshold;
    }
    if let Some(target) = args.profit_target {
        strategy_config.profit_target = target;
    }
    if let Some(stop) = args.stop_loss {
        strategy_config.stop_loss = stop;
    }

    let generator = SignalGenerator::new(strategy_config)?;

    let series = load_annotated_series(
        &data_path,
        &symbol,
        args.start.as_deref(),
        args.end.as_deref(),
        rsi_period,
    )
    .await?;
    let annotated = generator.generate(&series)?;

    let mut out = String::from("date,close,oscillator,signal\n");
    for (bar, signal) in annotated.iter() {
        let oscillator = bar
            .oscillator
            .map(|v| format!("{v:.4}"))
            .unwrap_or_default();
        out.push_str(&format!(
            "{},{},{},{}\n",
            bar.datetime().format("%Y-%m-%d"),
            bar.close,
            oscillator,
            signal
        ));
    }

    match &args.save {
        Some(path) => {
            std::fs::write(path, out)?;
            info!("Signals saved to {:?}", path);
        }
        None => print!("{out}"),
    }

    Ok(())
}
