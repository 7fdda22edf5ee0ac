//! Login flow engine
//!
//! Drives one login submission through risk evaluation and the decision gate:
//!
//! ```text
//! Submitted -> Evaluating -> {Proceeding, AwaitingConfirmation}
//! AwaitingConfirmation -> {Proceeding (override), Cancelled (abort)}
//! Proceeding -> Completed
//! Evaluating -(evaluator failure)-> Proceeding
//! ```
//!
//! The evaluator is an enhancement, not a gate: if scoring fails, times out,
//! or returns an unusable payload, the login proceeds with no assessment
//! recorded. Availability of login never depends on the scoring service.

use crate::gate::{self, Decision};
use crate::models::{LoginAttempt, LoginCredentials, RiskAssessment, User};
use crate::scoring::{RiskScoringClient, ScoringError};
use crate::session::{SessionError, SessionStore};
use crate::telemetry::TelemetryProvider;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, timeout};

/// Bound on how long one risk evaluation may run.
pub const DEFAULT_EVALUATION_TIMEOUT: Duration = Duration::from_secs(4);

/// Name recorded in the session for a wallet login.
const SESSION_DISPLAY_NAME: &str = "Verified User";

/// Where a login submission currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginState {
    Submitted,
    Evaluating,
    AwaitingConfirmation,
    Proceeding,
    Completed,
    Cancelled,
}

impl fmt::Display for LoginState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LoginState::Submitted => "Submitted",
            LoginState::Evaluating => "Evaluating",
            LoginState::AwaitingConfirmation => "AwaitingConfirmation",
            LoginState::Proceeding => "Proceeding",
            LoginState::Completed => "Completed",
            LoginState::Cancelled => "Cancelled",
        };
        write!(f, "{}", name)
    }
}

/// Errors surfaced to the caller of the flow.
///
/// Evaluation failures are not among them; those are recovered internally by
/// failing open.
#[derive(Error, Debug)]
pub enum LoginError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Proof that a login reached `Completed`.
#[derive(Debug, Clone)]
pub struct LoginReceipt {
    pub user: User,
    /// The assessment applied to this login. `None` when the evaluator was
    /// unavailable and the flow failed open.
    pub assessment: Option<RiskAssessment>,
}

/// A login paused in `AwaitingConfirmation`.
///
/// Consumed by [`LoginFlow::resolve`]; the override is one-time and nothing
/// about it is persisted.
#[derive(Debug)]
pub struct PendingConfirmation {
    credentials: LoginCredentials,
    attempt: LoginAttempt,
    assessment: RiskAssessment,
}

impl PendingConfirmation {
    pub fn state(&self) -> LoginState {
        LoginState::AwaitingConfirmation
    }

    /// The assessment that triggered the confirmation step.
    pub fn assessment(&self) -> &RiskAssessment {
        &self.assessment
    }

    /// The attempt the assessment was produced for.
    pub fn attempt(&self) -> &LoginAttempt {
        &self.attempt
    }
}

/// Result of submitting credentials.
#[derive(Debug)]
pub enum LoginProgress {
    /// The flow reached `Completed` without interruption.
    LoggedIn(LoginReceipt),
    /// The flow paused for an explicit user choice.
    ConfirmationRequired(PendingConfirmation),
}

/// The user's answer to the confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationChoice {
    ProceedAnyway,
    Cancel,
}

/// Result of resolving a paused login.
#[derive(Debug)]
pub enum LoginOutcome {
    Completed(LoginReceipt),
    Cancelled,
}

/// Orchestrates login submissions against injected collaborators.
///
/// Stateless across attempts: every submission is evaluated independently,
/// and the only shared piece is the session repository written on completion.
pub struct LoginFlow {
    scoring: Arc<dyn RiskScoringClient>,
    session: Arc<dyn SessionStore>,
    telemetry: Arc<dyn TelemetryProvider>,
    evaluation_timeout: Duration,
    completion_delay: Duration,
}

impl LoginFlow {
    /// Create a flow with the default evaluation timeout and no completion
    /// delay.
    pub fn new(
        scoring: Arc<dyn RiskScoringClient>,
        session: Arc<dyn SessionStore>,
        telemetry: Arc<dyn TelemetryProvider>,
    ) -> Self {
        Self::with_timing(
            scoring,
            session,
            telemetry,
            DEFAULT_EVALUATION_TIMEOUT,
            Duration::ZERO,
        )
    }

    /// Create a flow with explicit timing.
    ///
    /// `completion_delay` stands in for the latency of the mocked login
    /// backend; the demo takes it from configuration.
    pub fn with_timing(
        scoring: Arc<dyn RiskScoringClient>,
        session: Arc<dyn SessionStore>,
        telemetry: Arc<dyn TelemetryProvider>,
        evaluation_timeout: Duration,
        completion_delay: Duration,
    ) -> Self {
        LoginFlow {
            scoring,
            session,
            telemetry,
            evaluation_timeout,
            completion_delay,
        }
    }

    /// Run one login submission up to completion or the confirmation pause.
    pub async fn submit(&self, credentials: LoginCredentials) -> Result<LoginProgress, LoginError> {
        if !credentials.is_present() {
            return Err(LoginError::Validation(
                "wallet address or email is required".to_string(),
            ));
        }

        let sample = self.telemetry.sample();
        let attempt = LoginAttempt::new(
            credentials.wallet_address.clone(),
            sample.ip_address,
            sample.geolocation,
            sample.browser_fingerprint,
        );

        let mut state = LoginState::Submitted;
        state = self.advance(state, LoginState::Evaluating);

        let evaluation = match timeout(self.evaluation_timeout, self.scoring.score(&attempt)).await
        {
            Ok(result) => result,
            Err(_) => Err(ScoringError::Timeout(self.evaluation_timeout)),
        };

        match evaluation {
            Ok(assessment) => match gate::decide(&assessment) {
                Decision::Proceed => {
                    state = self.advance(state, LoginState::Proceeding);
                    let receipt = self.complete(state, &credentials, Some(assessment)).await?;
                    Ok(LoginProgress::LoggedIn(receipt))
                }
                Decision::Confirm => {
                    self.advance(state, LoginState::AwaitingConfirmation);
                    log::info!(
                        "Login for '{}' flagged at {:.2}, awaiting user confirmation",
                        credentials.wallet_address,
                        assessment.fraud_risk_score
                    );
                    Ok(LoginProgress::ConfirmationRequired(PendingConfirmation {
                        credentials,
                        attempt,
                        assessment,
                    }))
                }
            },
            Err(e) => {
                // Fail open: never let a broken evaluator block login.
                log::warn!("Risk evaluation unavailable, proceeding without it: {}", e);
                state = self.advance(state, LoginState::Proceeding);
                let receipt = self.complete(state, &credentials, None).await?;
                Ok(LoginProgress::LoggedIn(receipt))
            }
        }
    }

    /// Resolve a login paused for confirmation.
    pub async fn resolve(
        &self,
        pending: PendingConfirmation,
        choice: ConfirmationChoice,
    ) -> Result<LoginOutcome, LoginError> {
        let state = pending.state();
        match choice {
            ConfirmationChoice::ProceedAnyway => {
                log::info!(
                    "User overrode the risk warning for '{}' (score {:.2})",
                    pending.credentials.wallet_address,
                    pending.assessment.fraud_risk_score
                );
                let state = self.advance(state, LoginState::Proceeding);
                let receipt = self
                    .complete(state, &pending.credentials, Some(pending.assessment))
                    .await?;
                Ok(LoginOutcome::Completed(receipt))
            }
            ConfirmationChoice::Cancel => {
                self.advance(state, LoginState::Cancelled);
                log::info!(
                    "Login cancelled by user '{}'",
                    pending.credentials.wallet_address
                );
                Ok(LoginOutcome::Cancelled)
            }
        }
    }

    /// The logged-in user, if a session exists.
    pub fn current_user(&self) -> Result<Option<User>, LoginError> {
        Ok(self.session.get()?)
    }

    /// Clear the session.
    pub fn logout(&self) -> Result<(), LoginError> {
        self.session.clear()?;
        log::info!("Logged out");
        Ok(())
    }

    /// Finish a proceeding login: mocked backend delay, session write.
    async fn complete(
        &self,
        state: LoginState,
        credentials: &LoginCredentials,
        assessment: Option<RiskAssessment>,
    ) -> Result<LoginReceipt, LoginError> {
        if !self.completion_delay.is_zero() {
            sleep(self.completion_delay).await;
        }

        let user = User::new(SESSION_DISPLAY_NAME, credentials.wallet_address.clone());
        self.session.set(&user)?;
        self.advance(state, LoginState::Completed);

        Ok(LoginReceipt { user, assessment })
    }

    fn advance(&self, from: LoginState, to: LoginState) -> LoginState {
        log::debug!("Login state {} -> {}", from, to);
        to
    }
}
