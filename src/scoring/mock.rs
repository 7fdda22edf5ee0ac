//! Mock scoring clients for tests and offline demo runs.

use super::{RiskScoringClient, ScoringError};
use crate::models::{LoginAttempt, RiskAssessment};
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tokio::time::sleep;

/// Returns the same assessment for every attempt.
pub struct FixedScoringClient {
    assessment: RiskAssessment,
}

impl FixedScoringClient {
    pub fn new(fraud_risk_score: f64, recommendation: impl Into<String>) -> Self {
        FixedScoringClient {
            assessment: RiskAssessment::new(fraud_risk_score, recommendation),
        }
    }
}

#[async_trait]
impl RiskScoringClient for FixedScoringClient {
    async fn score(&self, _attempt: &LoginAttempt) -> Result<RiskAssessment, ScoringError> {
        Ok(self.assessment.clone())
    }
}

/// Simulates a scoring service outage on every call.
pub struct FailingScoringClient;

#[async_trait]
impl RiskScoringClient for FailingScoringClient {
    async fn score(&self, _attempt: &LoginAttempt) -> Result<RiskAssessment, ScoringError> {
        Err(ScoringError::Status(StatusCode::SERVICE_UNAVAILABLE))
    }
}

/// Waits before answering, for exercising evaluation timeouts.
pub struct SlowScoringClient {
    delay: Duration,
    assessment: RiskAssessment,
}

impl SlowScoringClient {
    pub fn new(delay: Duration, fraud_risk_score: f64, recommendation: impl Into<String>) -> Self {
        SlowScoringClient {
            delay,
            assessment: RiskAssessment::new(fraud_risk_score, recommendation),
        }
    }
}

#[async_trait]
impl RiskScoringClient for SlowScoringClient {
    async fn score(&self, _attempt: &LoginAttempt) -> Result<RiskAssessment, ScoringError> {
        sleep(self.delay).await;
        Ok(self.assessment.clone())
    }
}
