use serde::{Deserialize, Serialize};

/// Fraud-risk verdict for one login attempt.
///
/// The wire shape matches the scoring service contract exactly
/// (`fraudRiskScore`, `recommendation`). The score is a normalized
/// probability-like value; the recommendation is free text from the model and
/// carries no invariant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    pub fraud_risk_score: f64,
    pub recommendation: String,
}

impl RiskAssessment {
    pub fn new(fraud_risk_score: f64, recommendation: impl Into<String>) -> Self {
        RiskAssessment {
            fraud_risk_score,
            recommendation: recommendation.into(),
        }
    }

    /// True when the score is a normalized probability in `[0, 1]`.
    ///
    /// Scoring clients reject payloads that fail this check; a score of 7.3
    /// means a broken model contract, not high risk.
    pub fn has_normalized_score(&self) -> bool {
        self.fraud_risk_score.is_finite() && (0.0..=1.0).contains(&self.fraud_risk_score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_round_trip() {
        let json = r#"{"fraudRiskScore":0.42,"recommendation":"do not flag"}"#;
        let assessment: RiskAssessment = serde_json::from_str(json).unwrap();

        assert_eq!(assessment.fraud_risk_score, 0.42);
        assert_eq!(assessment.recommendation, "do not flag");

        let back = serde_json::to_string(&assessment).unwrap();
        assert!(back.contains("fraudRiskScore"));
    }

    #[test]
    fn test_normalized_score_bounds() {
        assert!(RiskAssessment::new(0.0, "ok").has_normalized_score());
        assert!(RiskAssessment::new(1.0, "flag").has_normalized_score());
        assert!(RiskAssessment::new(0.7, "borderline").has_normalized_score());

        assert!(!RiskAssessment::new(-0.1, "bad").has_normalized_score());
        assert!(!RiskAssessment::new(1.01, "bad").has_normalized_score());
        assert!(!RiskAssessment::new(f64::NAN, "bad").has_normalized_score());
        assert!(!RiskAssessment::new(f64::INFINITY, "bad").has_normalized_score());
    }
}
