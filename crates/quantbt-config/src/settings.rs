//! Configuration structures.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quantbt_strategy::SignalConfig;

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub strategy: SignalConfig,
    #[serde(default)]
    pub report: ReportSettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "quantbt".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

/// Data settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSettings {
    /// Symbol the input file describes
    pub symbol: String,
    /// Path to the historical data CSV
    pub path: String,
    /// RSI window length
    pub rsi_period: usize,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            symbol: "NCNA".to_string(),
            path: "data/bars.csv".to_string(),
            rsi_period: 14,
        }
    }
}

/// Report settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Shares/contracts per trade used for cash profit scaling
    pub position_size: Decimal,
}

impl Default for ReportSettings {
    fn default() -> Self {
        use rust_decimal_macros::dec;
        Self {
            position_size: dec!(1),
        }
    }
}
