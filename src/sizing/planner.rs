//! Validate-then-compute pipeline used by every caller.

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{RawInputs, Recommendation};

use super::{compute_recommendations, normalize, validate, ValidationReport};

/// Inputs, their validation outcome and the recommendation when allowed.
#[derive(Debug, Clone, Serialize)]
pub struct Evaluation {
    pub inputs: RawInputs,
    pub report: ValidationReport,
    /// `None` whenever validation produced an error
    pub recommendation: Option<Recommendation>,
}

impl Evaluation {
    pub fn is_blocked(&self) -> bool {
        self.recommendation.is_none()
    }
}

/// Run validation and, only if it passes, the full recommendation pipeline.
///
/// Recomputes everything from `raw` on every call.
pub fn evaluate(raw: RawInputs) -> Evaluation {
    let report = validate(&raw);

    for w in &report.warnings {
        warn!(mode = %raw.mode, warning = %w, "Input warning");
    }

    if !report.is_ok() {
        debug!(
            mode = %raw.mode,
            errors = report.errors.len(),
            "Validation failed, recommendation suppressed"
        );
        return Evaluation {
            inputs: raw,
            report,
            recommendation: None,
        };
    }

    let recommendation = compute_recommendations(&normalize(&raw));
    debug!(
        mode = %raw.mode,
        risk_fraction = recommendation.risk_fraction,
        active_cap = recommendation.active_cap.as_str(),
        loss_streak = recommendation.loss_streak_estimate,
        "Recommendation computed"
    );

    Evaluation {
        inputs: raw,
        report,
        recommendation: Some(recommendation),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Mode;
    use crate::profile::defaults_for;

    #[test]
    fn test_errors_suppress_recommendation() {
        let raw = RawInputs {
            starting_capital: 0.0,
            ..defaults_for(Mode::Stock)
        };
        let eval = evaluate(raw);
        assert!(eval.is_blocked());
        assert_eq!(eval.report.errors.len(), 1);
    }

    #[test]
    fn test_warnings_still_compute() {
        let raw = RawInputs {
            stop_loss_threshold_percent: 85.0,
            ..defaults_for(Mode::Fx)
        };
        let eval = evaluate(raw);
        assert!(!eval.report.warnings.is_empty());
        assert!(!eval.is_blocked());
    }

    #[test]
    fn test_fx_defaults_bind_on_user_cap() {
        let eval = evaluate(defaults_for(Mode::Fx));
        let rec = eval.recommendation.expect("fx defaults are valid");
        assert!((rec.stop_distance_percent - 1.44).abs() < 1e-9);
        assert!((rec.risk_fraction - 0.003).abs() < 1e-12);
        assert_eq!(rec.active_cap, crate::models::ActiveCap::UserMax);
    }
}
