//! Recommendation engine: capped Kelly, ruin floor and user cap.
//!
//! The risk fraction is the smallest of three independent caps:
//!
//! - Kelly cap: `k * max(0, p - q / b)`
//! - Ruin floor: `1 - L^(1/m)`, the largest fraction for which `m` straight
//!   losses keep equity above `L` of the starting capital
//! - User max: the hard per-trade ceiling
//!
//! The stop distance is the average loss widened by the stop margin, and the
//! position is sized so that hitting the stop loses exactly the risk amount.

use crate::models::{ActiveCap, NormalizedInputs, Recommendation, RiskAmountSource};

use super::loss_streak::estimate_loss_streak;

/// Compute the full recommendation from normalized inputs.
///
/// Total over validated inputs: degenerate values (zero stop distance,
/// infinite payoff ratio) resolve to zeros or well-defined limits.
///
/// A NaN win probability only warns during validation. It yields a zero
/// Kelly fraction, so the Kelly cap binds and nothing is risked; the loss
/// streak falls back to the search ceiling and the expected value is NaN.
pub fn compute_recommendations(norm: &NormalizedInputs) -> Recommendation {
    let stop_distance_percent = norm.avg_loss_percent * norm.stop_loss_margin;

    let p = norm.win_probability;
    let b = norm.payoff_ratio;
    let kelly_raw = if b > 0.0 { p - (1.0 - p) / b } else { 0.0 };
    let kelly_fraction = kelly_raw.max(0.0);
    let kelly_cap = norm.kelly_fraction_cap * kelly_fraction;

    let loss_streak_estimate =
        estimate_loss_streak(p, norm.horizon_trade_count, norm.breach_probability);
    let ruin_floor_fraction =
        1.0 - norm.stop_loss_threshold.powf(1.0 / f64::from(loss_streak_estimate));

    let (active_cap, risk_fraction) = binding_cap(&[
        (ActiveCap::Kelly, kelly_cap),
        (ActiveCap::Floor, ruin_floor_fraction),
        (ActiveCap::UserMax, norm.max_risk_per_trade),
    ]);

    let risk_from_fraction = risk_fraction * norm.starting_capital;
    let risk_from_drawdown = match norm.max_drawdown {
        Some(dd) if dd.is_finite() && dd > 0.0 => dd * norm.starting_capital,
        _ => f64::INFINITY,
    };
    let (risk_amount, risk_amount_source) = if risk_from_drawdown < risk_from_fraction {
        (risk_from_drawdown, RiskAmountSource::Drawdown)
    } else {
        (risk_from_fraction, RiskAmountSource::Fraction)
    };

    let position_notional = if stop_distance_percent > 0.0 {
        risk_amount / (stop_distance_percent / 100.0)
    } else {
        0.0
    };

    let expected_value_percent =
        p * norm.avg_win_percent - (1.0 - p) * norm.avg_loss_percent;

    Recommendation {
        stop_distance_percent,
        position_notional,
        risk_amount,
        risk_amount_source,
        risk_fraction,
        payoff_ratio: b,
        expected_value_percent,
        loss_streak_estimate,
        kelly_fraction,
        ruin_floor_fraction,
        active_cap,
    }
}

/// Single min-reduction that remembers which cap won.
///
/// Strict `<` keeps the earlier tag on ties. NaN candidates never win; with no
/// usable candidate the cap is `None` and nothing is risked.
fn binding_cap(candidates: &[(ActiveCap, f64)]) -> (ActiveCap, f64) {
    candidates
        .iter()
        .filter(|(_, value)| !value.is_nan())
        .fold(None, |best: Option<(ActiveCap, f64)>, &(cap, value)| match best {
            Some((_, best_value)) if best_value <= value => best,
            _ => Some((cap, value)),
        })
        .unwrap_or((ActiveCap::None, 0.0))
}
