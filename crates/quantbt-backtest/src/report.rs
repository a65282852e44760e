//! Backtest report generation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use quantbt_strategy::SignalConfig;

use crate::{PerformanceStats, Simulation};

/// Complete backtest report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestReport {
    /// Symbol the run was simulated over
    pub symbol: String,
    /// Strategy parameters used
    pub config: SignalConfig,
    /// Aggregate statistics
    pub stats: PerformanceStats,
    /// Raw simulation output (trades + diagnostics)
    pub simulation: Simulation,
}

impl BacktestReport {
    /// Assemble a report from a finished simulation.
    pub fn new(
        symbol: impl Into<String>,
        config: SignalConfig,
        simulation: Simulation,
        position_size: Decimal,
    ) -> Self {
        let stats = PerformanceStats::from_trades(&simulation.trades, position_size);
        Self {
            symbol: symbol.into(),
            config,
            stats,
            simulation,
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str(&format!("  BACKTEST REPORT: {}\n", self.symbol));
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("STRATEGY\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Oscillator Threshold: {:.1}\n",
            self.config.oscillator_threshold
        ));
        s.push_str(&format!(
            "  Profit Target:        {:.2}%\n",
            self.config.profit_target * 100.0
        ));
        s.push_str(&format!(
            "  Stop Loss:            {:.2}%\n",
            self.config.stop_loss * 100.0
        ));
        s.push('\n');

        s.push_str("TRADES\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for trade in &self.simulation.trades {
            s.push_str(&format!(
                "  {} -> {}  entry {:.4}  exit {:.4}  pnl {:+.2}%\n",
                trade.entry_datetime().format("%Y-%m-%d"),
                trade.exit_datetime().format("%Y-%m-%d"),
                trade.entry_price,
                trade.exit_price,
                trade.return_fraction * 100.0
            ));
        }
        if self.simulation.trades.is_empty() {
            s.push_str("  (no completed trades)\n");
        }
        s.push('\n');

        s.push_str("PERFORMANCE\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Total Trades:         {}\n",
            self.stats.total_trades
        ));
        s.push_str(&format!(
            "  Winning Trades:       {}\n",
            self.stats.winning_trades
        ));
        s.push_str(&format!(
            "  Losing Trades:        {}\n",
            self.stats.losing_trades
        ));
        s.push_str(&format!(
            "  Win Rate:             {:.2}%\n",
            self.stats.win_rate_pct
        ));
        s.push_str(&format!(
            "  Total Cash Profit:    ${:.2}\n",
            self.stats.total_cash_profit
        ));
        s.push_str(&format!(
            "  Total Percent Return: {:.2}%\n",
            self.stats.total_percent_return
        ));
        s.push('\n');

        if self.simulation.ignored_signals() > 0 || self.simulation.open_entries > 0 {
            s.push_str("DIAGNOSTICS\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            s.push_str(&format!(
                "  Ignored Enter Signals: {}\n",
                self.simulation.ignored_enters
            ));
            s.push_str(&format!(
                "  Ignored Exit Signals:  {}\n",
                self.simulation.ignored_exits
            ));
            s.push_str(&format!(
                "  Unclosed Entries:      {}\n",
                self.simulation.open_entries
            ));
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export the trade list to CSV.
    pub fn trades_to_csv(&self) -> String {
        let mut csv = String::from(
            "entry_date,exit_date,entry_price,exit_price,return_pct,cash_profit\n",
        );
        for trade in &self.simulation.trades {
            let cash = (trade.exit_price - trade.entry_price)
                * self.stats.position_size.to_f64().unwrap_or(1.0);
            csv.push_str(&format!(
                "{},{},{},{},{},{}\n",
                trade.entry_datetime().format("%Y-%m-%d"),
                trade.exit_datetime().format("%Y-%m-%d"),
                trade.entry_price,
                trade.exit_price,
                trade.return_fraction * 100.0,
                cash
            ));
        }
        csv
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quantbt_core::types::Trade;
    use rust_decimal_macros::dec;

    fn sample_report() -> BacktestReport {
        let simulation = Simulation {
            trades: vec![Trade {
                entry_timestamp: 86_400_000,
                exit_timestamp: 2 * 86_400_000,
                entry_price: 9.0,
                exit_price: 12.0,
                return_fraction: (12.0 - 9.0) / 9.0,
            }],
            ignored_enters: 0,
            ignored_exits: 0,
            open_entries: 1,
        };
        BacktestReport::new("NCNA", SignalConfig::default(), simulation, dec!(1))
    }

    #[test]
    fn test_report_summary() {
        let report = sample_report();
        let summary = report.summary();

        assert!(summary.contains("BACKTEST REPORT: NCNA"));
        assert!(summary.contains("Total Trades:         1"));
        assert!(summary.contains("Total Cash Profit:    $3.00"));
        assert!(summary.contains("Unclosed Entries:      1"));
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = sample_report();
        let json = report.to_json().unwrap();
        let parsed: BacktestReport = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.symbol, "NCNA");
        assert_eq!(parsed.simulation, report.simulation);
    }

    #[test]
    fn test_trades_to_csv() {
        let report = sample_report();
        let csv = report.trades_to_csv();

        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "entry_date,exit_date,entry_price,exit_price,return_pct,cash_profit"
        );
        let row = lines.next().unwrap();
        assert!(row.starts_with("1970-01-02,1970-01-03,9,12,"));
    }
}
