//! Bar-by-bar event loop — turns a signal sequence into ledger mutations and
//! valuation snapshots.
//!
//! Bars are processed strictly in ascending date order with no lookahead. Per
//! bar: read the current position, value the portfolio at the close, check the
//! protective exit (if configured), act on the signal, then append exactly one
//! valuation snapshot. A rejected or no-op trade never halts the run.

use crate::account::{PortfolioAccount, SizeDirective};
use crate::domain::{Bar, Signal};
use crate::error::EngineError;

use super::{
    BacktestConfig, BarAction, BarState, EntrySizing, RunResult, DEFAULT_CASH_FRACTION,
};

use std::collections::HashMap;

/// Run a backtest over `bars` with a 1:1 aligned `signals` feed, mutating
/// `account` in place. The account keeps the full trade history and snapshot
/// sequence; the returned result carries the per-bar states.
pub fn run_backtest(
    bars: &[Bar],
    signals: &[Signal],
    config: &BacktestConfig,
    account: &mut PortfolioAccount,
) -> Result<RunResult, EngineError> {
    if signals.len() != bars.len() {
        return Err(EngineError::SignalMismatch {
            bars: bars.len(),
            signals: signals.len(),
        });
    }
    for (i, pair) in bars.windows(2).enumerate() {
        if pair[1].date <= pair[0].date {
            return Err(EngineError::OutOfOrderBars { index: i + 1 });
        }
    }

    let symbol = config.symbol.as_str();
    let mut bar_states = Vec::with_capacity(bars.len());
    // Last entry price, armed while a protected position is open.
    let mut entry_price = 0.0_f64;

    for (bar, &signal) in bars.iter().zip(signals) {
        let held = account.held_shares(symbol);
        let portfolio_value = account.cash() + held * bar.close;

        let mut action = None;
        let mut shares_traded = 0.0;
        let mut stop_fired = false;

        if let Some(protection) = &config.protection {
            if held > 0.0 && entry_price > 0.0 {
                let loss_pct = (entry_price - bar.close) / entry_price;
                let profit_pct = (bar.close - entry_price) / entry_price;

                if loss_pct >= protection.stop_loss_pct {
                    if let Some(record) =
                        account.sell(bar.date, symbol, bar.close, SizeDirective::Shares(held))?
                    {
                        action = Some(BarAction::StopLoss);
                        shares_traded = record.shares;
                        entry_price = 0.0;
                    }
                    stop_fired = true;
                } else if profit_pct >= protection.take_profit_pct {
                    if let Some(record) =
                        account.sell(bar.date, symbol, bar.close, SizeDirective::Shares(held))?
                    {
                        action = Some(BarAction::TakeProfit);
                        shares_traded = record.shares;
                        entry_price = 0.0;
                    }
                    stop_fired = true;
                }
            }
        }

        if !stop_fired {
            match signal {
                Signal::Buy if held == 0.0 => {
                    let size = match config.sizing {
                        EntrySizing::FixedShares(n) => SizeDirective::Shares(n),
                        EntrySizing::CashFraction(f) => {
                            SizeDirective::Amount(account.cash() * f)
                        }
                        EntrySizing::Default => {
                            SizeDirective::Amount(account.cash() * DEFAULT_CASH_FRACTION)
                        }
                    };
                    if let Some(record) = account.buy(bar.date, symbol, bar.close, size)? {
                        action = Some(BarAction::Buy);
                        shares_traded = record.shares;
                        entry_price = bar.close;
                    }
                }
                Signal::Sell if held > 0.0 => {
                    if let Some(record) =
                        account.sell(bar.date, symbol, bar.close, SizeDirective::Shares(held))?
                    {
                        action = Some(BarAction::Sell);
                        shares_traded = record.shares;
                        entry_price = 0.0;
                    }
                }
                _ => {}
            }
        }

        account.record_valuation(
            bar.date,
            &HashMap::from([(symbol.to_string(), bar.close)]),
        );

        bar_states.push(BarState {
            date: bar.date,
            close: bar.close,
            signal,
            action,
            shares_traded,
            position_shares: held,
            portfolio_value,
            cash: account.cash(),
        });
    }

    let final_value = account
        .snapshots()
        .last()
        .map_or(account.cash(), |s| s.total_value);

    Ok(RunResult {
        bar_states,
        final_value,
        bar_count: bars.len(),
    })
}
