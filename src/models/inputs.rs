//! Calculator inputs in user-facing units and in normalized ratio units.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which default profile seeded the inputs. Does not change any formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Event-driven stock investing
    Stock,
    /// Futures / FX strategies backed by a backtest
    Fx,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Stock => "stock",
            Mode::Fx => "fx",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Stock => "Event-driven stocks",
            Mode::Fx => "Futures / FX (backtested)",
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs as the user edits them: percentages and plain numbers.
///
/// Any float may be NaN while a field is being edited; [`crate::validate`]
/// rejects those before anything is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInputs {
    pub mode: Mode,

    /// Account balance the calculation is anchored to
    pub starting_capital: f64,

    /// Equity level (percent of starting capital) at which trading halts
    pub stop_loss_threshold_percent: f64,

    /// Empirical win rate in percent
    pub win_probability_percent: f64,

    /// Average gain of a winning trade in percent
    pub avg_win_percent: f64,

    /// Average loss of a losing trade in percent, as a positive magnitude
    pub avg_loss_percent: f64,

    /// Historical max drawdown in percent, used as an alternative risk basis
    #[serde(default)]
    pub max_drawdown_percent: Option<f64>,

    /// Number of future trades the loss-streak bound is evaluated over
    pub horizon_trade_count: u32,

    /// Acceptable probability (percent) of hitting the stop-loss threshold
    pub breach_probability_percent: f64,

    /// Multiplier on the growth-optimal fraction (0 to 1)
    pub kelly_fraction_cap: f64,

    /// Multiplier on the average loss used to size the stop (>= 1)
    pub stop_loss_margin: f64,

    /// Hard ceiling on risk per trade in percent
    pub max_risk_per_trade_percent: f64,
}

/// Inputs converted to ratios, ready for the recommendation engine.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedInputs {
    pub mode: Mode,
    pub starting_capital: f64,
    /// Stop-loss threshold as a fraction of starting capital
    pub stop_loss_threshold: f64,
    pub win_probability: f64,
    /// Kept in percent: the stop distance and expected value are percent figures
    pub avg_win_percent: f64,
    pub avg_loss_percent: f64,
    pub max_drawdown: Option<f64>,
    /// `avg_win / avg_loss`, +inf when the average loss is zero
    pub payoff_ratio: f64,
    pub horizon_trade_count: u32,
    pub breach_probability: f64,
    pub kelly_fraction_cap: f64,
    pub stop_loss_margin: f64,
    pub max_risk_per_trade: f64,
}
