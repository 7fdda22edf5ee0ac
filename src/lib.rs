pub mod config;
pub mod directory;
pub mod flow;
pub mod gate;
pub mod ledger;
pub mod models;
pub mod registration;
pub mod scoring;
pub mod session;
pub mod telemetry;

// Re-export commonly used types
pub use models::{LoginAttempt, LoginCredentials, RiskAssessment, User};
pub use gate::{decide, Decision, FRAUD_RISK_THRESHOLD};
pub use flow::{ConfirmationChoice, LoginFlow, LoginOutcome, LoginProgress};
pub use scoring::{GenAiScoringClient, RiskScoringClient, ScoringError};
pub use session::{MemorySessionStore, SessionStore, SESSION_KEY};
