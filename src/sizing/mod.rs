//! Sizing pipeline: validation, normalization, loss-streak estimation and
//! the recommendation engine.

mod engine;
mod loss_streak;
mod normalizer;
mod planner;
mod validator;

pub use engine::compute_recommendations;
pub use loss_streak::{estimate_loss_streak, MAX_STREAK_SEARCH};
pub use normalizer::normalize;
pub use planner::{evaluate, Evaluation};
pub use validator::{validate, ValidationError, ValidationReport, ValidationWarning};
