//! CLI definitions.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "quantbt")]
#[command(author, version, about = "Single-asset oscillator backtesting toolkit")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Log level
    #[arg(short, long, default_value = "info")]
    pub log_level: LogLevel,

    /// Enable JSON log format
    #[arg(long)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Clone, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a backtest over a historical data file
    Backtest(BacktestArgs),
    /// Print the signal-annotated series without simulating trades
    Signals(SignalsArgs),
    /// Validate configuration
    ValidateConfig,
}

#[derive(clap::Args)]
pub struct BacktestArgs {
    /// Historical data file (CSV); overrides the configured path
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Symbol the data file describes
    #[arg(short = 'S', long)]
    pub symbol: Option<String>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), exclusive
    #[arg(long)]
    pub end: Option<String>,

    /// RSI window length
    #[arg(long)]
    pub rsi_period: Option<usize>,

    /// Oscillator entry threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Profit target as a fraction (e.g. 0.05)
    #[arg(long)]
    pub profit_target: Option<f64>,

    /// Stop loss as a fraction (e.g. 0.02)
    #[arg(long)]
    pub stop_loss: Option<f64>,

    /// Shares per trade for cash profit scaling
    #[arg(long)]
    pub position_size: Option<f64>,

    /// Output format (text, json)
    #[arg(long, default_value = "text")]
    pub output: String,

    /// Save the JSON report to a file
    #[arg(long)]
    pub save: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct SignalsArgs {
    /// Historical data file (CSV); overrides the configured path
    #[arg(short, long)]
    pub data: Option<PathBuf>,

    /// Symbol the data file describes
    #[arg(short = 'S', long)]
    pub symbol: Option<String>,

    /// Start date (YYYY-MM-DD), inclusive
    #[arg(long)]
    pub start: Option<String>,

    /// End date (YYYY-MM-DD), exclusive
    #[arg(long)]
    pub end: Option<String>,

    /// RSI window length
    #[arg(long)]
    pub rsi_period: Option<usize>,

    /// Oscillator entry threshold
    #[arg(long)]
    pub threshold: Option<f64>,

    /// Profit target as a fraction (e.g. 0.05)
    #[arg(long)]
    pub profit_target: Option<f64>,

    /// Stop loss as a fraction (e.g. 0.02)
    #[arg(long)]
    pub stop_loss: Option<f64>,

    /// Save the annotated series to a CSV file instead of printing
    #[arg(long)]
    pub save: Option<PathBuf>,
}
