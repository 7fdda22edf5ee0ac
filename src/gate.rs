//! Login decision gate
//!
//! Pure mapping from a risk assessment to a proceed/confirm outcome. The
//! threshold is a fixed policy constant shared by every login attempt.

use crate::models::RiskAssessment;

/// Scores strictly above this value interrupt the login with a confirmation
/// step. A score of exactly 0.7 proceeds.
pub const FRAUD_RISK_THRESHOLD: f64 = 0.7;

/// What the login flow should do with a scored attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Continue the login without interruption.
    Proceed,
    /// Pause and require an explicit user confirmation first.
    Confirm,
}

/// Apply the fixed threshold to an assessment.
///
/// Pure and deterministic; the recommendation text plays no part in the
/// decision.
pub fn decide(assessment: &RiskAssessment) -> Decision {
    if assessment.fraud_risk_score > FRAUD_RISK_THRESHOLD {
        Decision::Confirm
    } else {
        Decision::Proceed
    }
}
