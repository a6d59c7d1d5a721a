//! Position size and stop-loss recommendations for a single trade.
//!
//! The core is four pure functions: [`validate`], [`normalize`],
//! [`estimate_loss_streak`] and [`compute_recommendations`]. Callers must not
//! compute a recommendation for inputs that fail validation; [`evaluate`]
//! does that sequencing.

pub mod models;
pub mod profile;
pub mod report;
pub mod sizing;

pub use models::{ActiveCap, Mode, NormalizedInputs, RawInputs, Recommendation, RiskAmountSource};
pub use sizing::{
    compute_recommendations, estimate_loss_streak, evaluate, normalize, validate, Evaluation,
    ValidationError, ValidationReport, ValidationWarning,
};
