//! Aggregate performance statistics.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use quantbt_core::types::Trade;

/// Performance summary over a list of completed trades.
///
/// Cash arithmetic is done in `Decimal`; each trade price is converted
/// from its simulation value exactly once here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceStats {
    /// Shares/contracts per trade used for cash scaling
    pub position_size: Decimal,
    /// Total number of completed trades
    pub total_trades: usize,
    /// Trades that closed above their entry
    pub winning_trades: usize,
    /// Trades that closed below their entry
    pub losing_trades: usize,
    /// Win rate percentage
    pub win_rate_pct: Decimal,
    /// Sum of per-trade cash profits
    pub total_cash_profit: Decimal,
    /// Sum of entry prices scaled by position size
    pub total_invested: Decimal,
    /// Total cash profit relative to invested capital, as a percentage;
    /// 0 when nothing was invested
    pub total_percent_return: Decimal,
    /// Average cash profit of winning trades
    pub avg_win: Decimal,
    /// Average cash loss of losing trades
    pub avg_loss: Decimal,
    /// Gross profit / gross loss
    pub profit_factor: Decimal,
}

fn to_decimal(value: f64) -> Decimal {
    Decimal::try_from(value).unwrap_or_default()
}

impl PerformanceStats {
    /// Aggregate a trade list.
    pub fn from_trades(trades: &[Trade], position_size: Decimal) -> Self {
        let mut total_cash_profit = Decimal::ZERO;
        let mut total_invested = Decimal::ZERO;
        let mut gross_profit = Decimal::ZERO;
        let mut gross_loss = Decimal::ZERO;
        let mut winning_trades = 0;
        let mut losing_trades = 0;

        for trade in trades {
            let entry = to_decimal(trade.entry_price);
            let exit = to_decimal(trade.exit_price);
            let cash = (exit - entry) * position_size;

            total_cash_profit += cash;
            total_invested += entry * position_size;

            if cash > Decimal::ZERO {
                winning_trades += 1;
                gross_profit += cash;
            } else if cash < Decimal::ZERO {
                losing_trades += 1;
                gross_loss += cash.abs();
            }
        }

        let total_trades = trades.len();

        let win_rate_pct = if total_trades > 0 {
            Decimal::from(winning_trades * 100) / Decimal::from(total_trades)
        } else {
            Decimal::ZERO
        };

        let total_percent_return = if total_invested != Decimal::ZERO {
            total_cash_profit / total_invested * dec!(100)
        } else {
            Decimal::ZERO
        };

        let avg_win = if winning_trades > 0 {
            gross_profit / Decimal::from(winning_trades)
        } else {
            Decimal::ZERO
        };
        let avg_loss = if losing_trades > 0 {
            gross_loss / Decimal::from(losing_trades)
        } else {
            Decimal::ZERO
        };

        let profit_factor = if gross_loss > Decimal::ZERO {
            gross_profit / gross_loss
        } else {
            Decimal::ZERO
        };

        Self {
            position_size,
            total_trades,
            winning_trades,
            losing_trades,
            win_rate_pct,
            total_cash_profit,
            total_invested,
            total_percent_return,
            avg_win,
            avg_loss,
            profit_factor,
        }
    }
}
