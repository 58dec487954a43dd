// src/signal/sizer.rs
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::SizingConfig;
use crate::types::{Action, TradeDecision, TradePlan};
use crate::utils::money::to_money;

/// Turns a decision into concrete entry/exit/stop levels and a trade amount.
///
/// Risk and reward percentages scale with recent volatility when an ATR value
/// is supplied; a non-positive or missing current price degrades to an
/// all-zero HOLD plan (flagged via `note`) instead of erroring.
pub fn size(
    decision: &TradeDecision,
    current_price: f64,
    portfolio_value: f64,
    atr: Option<f64>,
    coin: &str,
    cfg: &SizingConfig,
) -> TradePlan {
    if !current_price.is_finite() || current_price <= 0.0 {
        return TradePlan {
            coin: coin.to_string(),
            action: Action::Hold,
            entry_price: Decimal::ZERO,
            exit_price: Decimal::ZERO,
            stop_loss: Decimal::ZERO,
            amount: Decimal::ZERO,
            current_price: Decimal::ZERO,
            note: Some("invalid current price".to_string()),
        };
    }

    let mut risk_pct = cfg.risk_pct;
    let mut reward_pct = cfg.reward_pct;
    if let Some(atr) = atr {
        let vol_factor =
            (atr / current_price * cfg.vol_scale).clamp(cfg.vol_factor_min, cfg.vol_factor_max);
        risk_pct *= vol_factor;
        reward_pct *= vol_factor;
        debug!(%coin, atr, vol_factor, "volatility-scaled trade levels");
    }

    let (entry, exit, stop) = match decision.action {
        Action::Long => (
            current_price,
            current_price * (1.0 + reward_pct),
            current_price * (1.0 - risk_pct),
        ),
        Action::Short => (
            current_price,
            current_price * (1.0 - reward_pct),
            current_price * (1.0 + risk_pct),
        ),
        Action::Hold => (current_price, current_price, current_price),
    };

    // Never more than the allocation cap on a single trade.
    let amount = match decision.action {
        Action::Hold => 0.0,
        _ => (portfolio_value * cfg.max_allocation)
            .min(portfolio_value * reward_pct * decision.confidence),
    };

    TradePlan {
        coin: coin.to_string(),
        action: decision.action,
        entry_price: to_money(entry),
        exit_price: to_money(exit),
        stop_loss: to_money(stop),
        amount: to_money(amount),
        current_price: to_money(current_price),
        note: None,
    }
}

/// P/L preview of a plan: the percentage move captured if the target fills
/// and the percentage lost if the stop fills, plus their ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TradeOutlook {
    pub pnl_pct_target: f64,
    pub pnl_pct_stop: f64,
    pub reward_risk: f64,
}

/// None for HOLD and degraded plans; there is nothing to preview.
pub fn outlook(plan: &TradePlan) -> Option<TradeOutlook> {
    if plan.note.is_some() {
        return None;
    }
    let entry = plan.entry_price.to_f64()?;
    if entry <= 0.0 {
        return None;
    }
    let exit = plan.exit_price.to_f64()?;
    let stop = plan.stop_loss.to_f64()?;

    let (pnl_pct_target, pnl_pct_stop) = match plan.action {
        Action::Long => (
            (exit - entry) / entry * 100.0,
            (stop - entry) / entry * 100.0,
        ),
        Action::Short => (
            (entry - exit) / entry * 100.0,
            (entry - stop) / entry * 100.0,
        ),
        Action::Hold => return None,
    };
    if pnl_pct_stop == 0.0 {
        return None;
    }

    Some(TradeOutlook {
        pnl_pct_target,
        pnl_pct_stop,
        reward_risk: pnl_pct_target / pnl_pct_stop.abs(),
    })
}
