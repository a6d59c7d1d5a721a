//! Data models for calculator inputs and recommendations.

mod inputs;
mod recommendation;

pub use inputs::{Mode, NormalizedInputs, RawInputs};
pub use recommendation::{ActiveCap, Recommendation, RiskAmountSource};
