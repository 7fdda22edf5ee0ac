//! Identity registration flow
//!
//! Validates a submitted profile, digests it into the proof that would be
//! anchored on the ledger, simulates the anchoring delay, and signs the new
//! identity in. All ledger interaction is mocked; the digest is real.

use crate::models::{IdentityRecord, IdentityStatus, RegistrationProfile, User};
use crate::session::{SessionError, SessionStore};
use regex::Regex;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";

#[derive(Error, Debug)]
pub enum RegistrationError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Pattern error: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),
}

/// Creates new identities from submitted profiles.
pub struct Registrar {
    session: Arc<dyn SessionStore>,
    anchoring_delay: Duration,
}

impl Registrar {
    pub fn new(session: Arc<dyn SessionStore>) -> Self {
        Self::with_anchoring_delay(session, Duration::ZERO)
    }

    /// `anchoring_delay` stands in for the ledger round trip; the demo takes
    /// it from configuration.
    pub fn with_anchoring_delay(session: Arc<dyn SessionStore>, anchoring_delay: Duration) -> Self {
        Registrar {
            session,
            anchoring_delay,
        }
    }

    /// Validate, anchor, and sign in a new identity.
    ///
    /// The returned record starts in `In Review`; promotion to `Verified` is
    /// a backend concern outside this demo.
    pub async fn register(
        &self,
        profile: RegistrationProfile,
    ) -> Result<IdentityRecord, RegistrationError> {
        Self::validate(&profile)?;

        let proof = proof_digest(&profile);
        log::info!(
            "Securing identity for '{}': hashing data and generating proof on the ledger",
            profile.full_name
        );

        if !self.anchoring_delay.is_zero() {
            sleep(self.anchoring_delay).await;
        }

        let record = IdentityRecord::new(
            profile.full_name.trim(),
            profile.wallet_address.trim(),
            proof,
            IdentityStatus::InReview,
        );

        self.session
            .set(&User::new(&record.name, &record.wallet_address))?;
        log::info!(
            "Registration successful for '{}', identity status {}",
            record.name,
            record.status
        );

        Ok(record)
    }

    fn validate(profile: &RegistrationProfile) -> Result<(), RegistrationError> {
        if profile.full_name.trim().chars().count() < 2 {
            return Err(RegistrationError::Validation(
                "full name is required".to_string(),
            ));
        }

        let email_pattern = Regex::new(EMAIL_PATTERN)?;
        if !email_pattern.is_match(profile.email.trim()) {
            return Err(RegistrationError::Validation(
                "invalid email address".to_string(),
            ));
        }

        if profile.wallet_address.trim().is_empty() {
            return Err(RegistrationError::Validation(
                "wallet address is required".to_string(),
            ));
        }

        if profile.id_document.is_empty() {
            return Err(RegistrationError::Validation(
                "ID document is required".to_string(),
            ));
        }

        if profile.selfie.is_empty() {
            return Err(RegistrationError::Validation(
                "selfie is required".to_string(),
            ));
        }

        Ok(())
    }
}

/// Digest the profile and its evidence into the proof anchored for this
/// identity. Deterministic over its inputs.
pub fn proof_digest(profile: &RegistrationProfile) -> String {
    let mut hasher = Sha256::new();
    hasher.update(profile.full_name.trim().as_bytes());
    hasher.update(profile.email.trim().as_bytes());
    hasher.update(profile.wallet_address.trim().as_bytes());
    hasher.update(&profile.id_document.content);
    hasher.update(&profile.selfie.content);
    let result = hasher.finalize();
    format!("{:x}", result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EvidenceDocument;
    use crate::session::MemorySessionStore;

    fn profile() -> RegistrationProfile {
        RegistrationProfile {
            full_name: "Alice Johnson".to_string(),
            email: "alice@example.com".to_string(),
            wallet_address: "rP9jPy123".to_string(),
            id_document: EvidenceDocument::new("id.png", vec![1, 2, 3]),
            selfie: EvidenceDocument::new("selfie.png", vec![4, 5, 6]),
        }
    }

    fn registrar() -> (Registrar, Arc<MemorySessionStore>) {
        let store = Arc::new(MemorySessionStore::new());
        (Registrar::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_register_creates_in_review_identity() {
        let (registrar, store) = registrar();

        let record = registrar.register(profile()).await.unwrap();

        assert_eq!(record.name, "Alice Johnson");
        assert_eq!(record.wallet_address, "rP9jPy123");
        assert_eq!(record.status, IdentityStatus::InReview);
        assert_eq!(record.hashed_proof.len(), 64);

        let user = store.get().unwrap().unwrap();
        assert_eq!(user.name, "Alice Johnson");
        assert_eq!(user.wallet, "rP9jPy123");
    }

    #[tokio::test]
    async fn test_short_name_rejected() {
        let (registrar, store) = registrar();
        let mut bad = profile();
        bad.full_name = "A".to_string();

        let err = registrar.register(bad).await.unwrap_err();
        assert!(matches!(err, RegistrationError::Validation(_)));
        assert!(store.get().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_email_rejected() {
        let (registrar, _store) = registrar();

        for email in ["not-an-email", "a@b", "a b@example.com", ""] {
            let mut bad = profile();
            bad.email = email.to_string();
            let err = registrar.register(bad).await.unwrap_err();
            assert!(matches!(err, RegistrationError::Validation(_)), "{}", email);
        }
    }

    #[tokio::test]
    async fn test_missing_evidence_rejected() {
        let (registrar, _store) = registrar();

        let mut bad = profile();
        bad.id_document = EvidenceDocument::new("id.png", vec![]);
        assert!(registrar.register(bad).await.is_err());

        let mut bad = profile();
        bad.selfie = EvidenceDocument::new("selfie.png", vec![]);
        assert!(registrar.register(bad).await.is_err());
    }

    #[test]
    fn test_proof_digest_is_deterministic() {
        let a = proof_digest(&profile());
        let b = proof_digest(&profile());
        assert_eq!(a, b);

        let mut changed = profile();
        changed.id_document = EvidenceDocument::new("id.png", vec![9, 9, 9]);
        assert_ne!(a, proof_digest(&changed));
    }
}
