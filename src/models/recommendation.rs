//! Output of the recommendation engine.

use serde::{Deserialize, Serialize};

/// Which risk constraint bound the recommended fraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActiveCap {
    Kelly,
    Floor,
    UserMax,
    None,
}

impl ActiveCap {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActiveCap::Kelly => "kelly",
            ActiveCap::Floor => "floor",
            ActiveCap::UserMax => "user_max",
            ActiveCap::None => "none",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveCap::Kelly => "Kelly cap",
            ActiveCap::Floor => "ruin floor",
            ActiveCap::UserMax => "user max",
            ActiveCap::None => "no cap",
        }
    }
}

/// Basis the final risk amount came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskAmountSource {
    /// Max drawdown times starting capital
    #[serde(rename = "dd")]
    Drawdown,
    /// Risk fraction times starting capital
    #[serde(rename = "f")]
    Fraction,
}

/// Recommended stop distance and position size for one trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Stop distance in percent of entry price
    pub stop_distance_percent: f64,
    /// Position size in account currency
    pub position_notional: f64,
    /// Currency lost if the stop is hit
    pub risk_amount: f64,
    pub risk_amount_source: RiskAmountSource,
    /// Risk per trade actually used (0 to 1)
    pub risk_fraction: f64,
    pub payoff_ratio: f64,
    pub expected_value_percent: f64,
    pub loss_streak_estimate: u32,
    /// Growth-optimal fraction, floored at zero
    pub kelly_fraction: f64,
    pub ruin_floor_fraction: f64,
    pub active_cap: ActiveCap,
}
