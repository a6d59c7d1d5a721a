//! Conversion from user-facing percentages to ratios.

use crate::models::{NormalizedInputs, RawInputs};

/// Convert validated raw inputs into ratio units and derive the payoff ratio.
///
/// Average win and loss stay in percent. Never fails; callers validate first.
pub fn normalize(raw: &RawInputs) -> NormalizedInputs {
    let payoff_ratio = if raw.avg_loss_percent > 0.0 {
        raw.avg_win_percent / raw.avg_loss_percent
    } else {
        f64::INFINITY
    };

    NormalizedInputs {
        mode: raw.mode,
        starting_capital: raw.starting_capital,
        stop_loss_threshold: raw.stop_loss_threshold_percent / 100.0,
        win_probability: raw.win_probability_percent / 100.0,
        avg_win_percent: raw.avg_win_percent,
        avg_loss_percent: raw.avg_loss_percent,
        max_drawdown: raw.max_drawdown_percent.map(|dd| dd / 100.0),
        payoff_ratio,
        horizon_trade_count: raw.horizon_trade_count,
        breach_probability: raw.breach_probability_percent / 100.0,
        kelly_fraction_cap: raw.kelly_fraction_cap,
        stop_loss_margin: raw.stop_loss_margin,
        max_risk_per_trade: raw.max_risk_per_trade_percent / 100.0,
    }
}
