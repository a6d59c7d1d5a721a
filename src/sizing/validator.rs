//! Input validation: hard errors block the calculation, warnings do not.

use serde::Serialize;
use thiserror::Error;

use crate::models::RawInputs;

/// Stop-loss threshold at or above which trading halts too easily.
const HIGH_STOP_LINE_PERCENT: f64 = 80.0;

/// Average loss below which the stop distance becomes numerically fragile.
const MIN_COMFORTABLE_LOSS_PERCENT: f64 = 0.1;

/// Input problem that prevents a recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationError {
    #[error("starting capital must be greater than 0")]
    NonPositiveCapital,
    #[error("stop-loss threshold (%) must be between 0 and 100")]
    StopLineOutOfRange,
    #[error("average win (%) must be greater than 0")]
    NonPositiveAvgWin,
    #[error("average loss (%) must be greater than 0")]
    NonPositiveAvgLoss,
    #[error("horizon trade count must be at least 1")]
    EmptyHorizon,
    #[error("Kelly cap multiplier must be between 0 and 1")]
    KellyCapOutOfRange,
    #[error("stop-loss margin must be at least 1")]
    MarginBelowOne,
    #[error("max risk per trade (%) must be between 0 and 100")]
    MaxRiskOutOfRange,
}

/// Input that is usable but suspicious.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    #[error("win probability is extreme; check the backtest statistics")]
    ExtremeWinProbability,
    #[error("breach probability target (%) should be between 0 and 100")]
    BreachProbabilityOutOfRange,
    #[error("a high stop-loss threshold halts trading after small declines")]
    HighStopLine,
    #[error("average loss may be too small; raising the stop-loss margin is safer")]
    TinyAvgLoss,
}

/// Every rule violated by a set of inputs, collected in one pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// True when a recommendation may be computed.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Check raw inputs against every hard and soft rule.
///
/// NaN fails every range check, so a half-edited field is always an error
/// (or a warning for the soft fields).
pub fn validate(raw: &RawInputs) -> ValidationReport {
    let mut report = ValidationReport::default();
    let mut error = |failed: bool, e: ValidationError| {
        if failed {
            report.errors.push(e);
        }
    };

    error(!positive(raw.starting_capital), ValidationError::NonPositiveCapital);
    error(
        !open_range(raw.stop_loss_threshold_percent, 0.0, 100.0),
        ValidationError::StopLineOutOfRange,
    );
    error(!positive(raw.avg_win_percent), ValidationError::NonPositiveAvgWin);
    error(!positive(raw.avg_loss_percent), ValidationError::NonPositiveAvgLoss);
    error(raw.horizon_trade_count == 0, ValidationError::EmptyHorizon);
    error(
        !(0.0..=1.0).contains(&raw.kelly_fraction_cap),
        ValidationError::KellyCapOutOfRange,
    );
    error(!at_least(raw.stop_loss_margin, 1.0), ValidationError::MarginBelowOne);
    error(
        !open_range(raw.max_risk_per_trade_percent, 0.0, 100.0),
        ValidationError::MaxRiskOutOfRange,
    );

    if !open_range(raw.win_probability_percent, 0.0, 100.0) {
        report.warnings.push(ValidationWarning::ExtremeWinProbability);
    }
    if !open_range(raw.breach_probability_percent, 0.0, 100.0) {
        report.warnings.push(ValidationWarning::BreachProbabilityOutOfRange);
    }
    if raw.stop_loss_threshold_percent >= HIGH_STOP_LINE_PERCENT {
        report.warnings.push(ValidationWarning::HighStopLine);
    }
    if raw.avg_loss_percent < MIN_COMFORTABLE_LOSS_PERCENT {
        report.warnings.push(ValidationWarning::TinyAvgLoss);
    }

    report
}

fn positive(x: f64) -> bool {
    x > 0.0
}

fn at_least(x: f64, lo: f64) -> bool {
    x >= lo
}

fn open_range(x: f64, lo: f64, hi: f64) -> bool {
    x > lo && x < hi
}
