use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// The session record kept while a user is logged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub name: String,
    pub wallet: String,
}

impl User {
    pub fn new(name: impl Into<String>, wallet: impl Into<String>) -> Self {
        User {
            name: name.into(),
            wallet: wallet.into(),
        }
    }
}

/// Review state of a registered identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityStatus {
    Verified,
    #[serde(rename = "In Review")]
    InReview,
    Flagged,
}

impl fmt::Display for IdentityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityStatus::Verified => write!(f, "Verified"),
            IdentityStatus::InReview => write!(f, "In Review"),
            IdentityStatus::Flagged => write!(f, "Flagged"),
        }
    }
}

/// One identity as listed in the directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityRecord {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub name: String,
    pub wallet_address: String,
    pub hashed_proof: String,
    pub status: IdentityStatus,
    pub created_at: DateTime<Utc>,
}

impl IdentityRecord {
    pub fn new(
        name: impl Into<String>,
        wallet_address: impl Into<String>,
        hashed_proof: impl Into<String>,
        status: IdentityStatus,
    ) -> Self {
        IdentityRecord {
            id: Uuid::new_v4(),
            name: name.into(),
            wallet_address: wallet_address.into(),
            hashed_proof: hashed_proof.into(),
            status,
            created_at: Utc::now(),
        }
    }
}

/// Result of a ledger proof lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProofStatus {
    Verified,
    Pending,
    Invalid,
}

impl fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProofStatus::Verified => write!(f, "Verified"),
            ProofStatus::Pending => write!(f, "Pending"),
            ProofStatus::Invalid => write!(f, "Invalid"),
        }
    }
}

/// Verdict recorded by a third-party verifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VerificationOutcome {
    Approved,
    Rejected,
}

impl fmt::Display for VerificationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerificationOutcome::Approved => write!(f, "Approved"),
            VerificationOutcome::Rejected => write!(f, "Rejected"),
        }
    }
}

/// One entry in an identity's verification history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationEvent {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub verifier: String,
    pub date: NaiveDate,
    pub outcome: VerificationOutcome,
}

impl VerificationEvent {
    pub fn new(verifier: impl Into<String>, date: NaiveDate, outcome: VerificationOutcome) -> Self {
        VerificationEvent {
            id: Uuid::new_v4(),
            verifier: verifier.into(),
            date,
            outcome,
        }
    }
}

/// An uploaded document backing a registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceDocument {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl EvidenceDocument {
    pub fn new(file_name: impl Into<String>, content: Vec<u8>) -> Self {
        EvidenceDocument {
            file_name: file_name.into(),
            content,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

/// Everything a user submits to create a new identity.
#[derive(Debug, Clone)]
pub struct RegistrationProfile {
    pub full_name: String,
    pub email: String,
    pub wallet_address: String,
    pub id_document: EvidenceDocument,
    pub selfie: EvidenceDocument,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_matches_wire_names() {
        assert_eq!(IdentityStatus::InReview.to_string(), "In Review");

        let json = serde_json::to_string(&IdentityStatus::InReview).unwrap();
        assert_eq!(json, "\"In Review\"");

        let parsed: IdentityStatus = serde_json::from_str("\"In Review\"").unwrap();
        assert_eq!(parsed, IdentityStatus::InReview);
    }

    #[test]
    fn test_user_json_round_trip() {
        let user = User::new("Verified User", "rP9jPy123");
        let json = serde_json::to_string(&user).unwrap();
        let back: User = serde_json::from_str(&json).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_evidence_emptiness() {
        assert!(EvidenceDocument::new("id.png", vec![]).is_empty());
        assert!(!EvidenceDocument::new("id.png", vec![1, 2, 3]).is_empty());
    }
}
