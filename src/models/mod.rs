mod assessment;
mod attempt;
mod identity;

pub use assessment::RiskAssessment;
pub use attempt::{LoginAttempt, LoginCredentials};
pub use identity::{
    EvidenceDocument, IdentityRecord, IdentityStatus, ProofStatus, RegistrationProfile, User,
    VerificationEvent, VerificationOutcome,
};
