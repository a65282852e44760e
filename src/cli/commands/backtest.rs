//! Backtest command implementation.

use anyhow::Result;
use rust_decimal::Decimal;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use quantbt_backtest::{BacktestReport, TradeSimulator};
use quantbt_strategy::SignalGenerator;

use super::{load_annotated_series, load_app_config};
use crate::cli::BacktestArgs;

pub async fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
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

    let generator = SignalGenerator::new(strategy_config.clone())?;

    info!(symbol = %symbol, data = %data_path.display(), "starting backtest");

    let series = load_annotated_series(
        &data_path,
        &symbol,
        args.start.as_deref(),
        args.end.as_deref(),
        rsi_period,
    )
    .await?;

    let annotated = generator.generate(&series)?;
    let simulation = TradeSimulator::new().run(&annotated)?;

    if simulation.ignored_signals() > 0 {
        warn!(
            ignored = simulation.ignored_signals(),
            "signal source emitted signals inconsistent with the position state"
        );
    }
    info!(
        trades = simulation.trades.len(),
        bars = annotated.len(),
        "backtest complete"
    );

    let position_size = match args.position_size {
        Some(size) => Decimal::try_from(size).unwrap_or_default(),
        None => config.report.position_size,
    };
    let report = BacktestReport::new(symbol, strategy_config, simulation, position_size);

    // Output results
    match args.output.as_str() {
        "json" => println!("{}", report.to_json()?),
        _ => println!("{}", report.summary()),
    }

    // Save if requested
    if let Some(save_path) = &args.save {
        std::fs::write(save_path, report.to_json()?)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
