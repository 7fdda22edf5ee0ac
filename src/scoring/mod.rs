//! Risk scoring clients
//!
//! The login flow scores each attempt through an injected
//! [`RiskScoringClient`]. The production client talks to a generative model
//! over HTTP; mock clients back tests and offline demo runs. Every failure
//! variant means the same thing to the caller: the evaluation is unavailable
//! and login falls back to proceeding.

pub mod gen_ai;
pub mod mock;

pub use gen_ai::GenAiScoringClient;
pub use mock::{FailingScoringClient, FixedScoringClient, SlowScoringClient};

use crate::models::{LoginAttempt, RiskAssessment};
use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while scoring a login attempt.
///
/// None of these are user-visible; the flow recovers from all of them by
/// failing open.
#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scoring service returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Scoring call exceeded its {0:?} timeout")]
    Timeout(Duration),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Model reply carried no usable content")]
    MissingContent,

    #[error("Model reply failed shape validation: {0}")]
    InvalidShape(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// A capability that can score login attempts for fraud risk.
///
/// Implementations must be safe to share across attempts; each call is
/// independent and stateless from the caller's point of view.
#[async_trait]
pub trait RiskScoringClient: Send + Sync {
    /// Score one attempt. A single best-effort call, no retries.
    async fn score(&self, attempt: &LoginAttempt) -> Result<RiskAssessment, ScoringError>;
}
