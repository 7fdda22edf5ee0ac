use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login form input as submitted by the user.
///
/// The form layer only guarantees presence; wallet addresses and emails are
/// accepted interchangeably, so no format check is applied here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub wallet_address: String,
}

impl LoginCredentials {
    pub fn new(wallet_address: impl Into<String>) -> Self {
        LoginCredentials {
            wallet_address: wallet_address.into(),
        }
    }

    /// Check that the identifier is non-empty (ignoring surrounding whitespace).
    pub fn is_present(&self) -> bool {
        !self.wallet_address.trim().is_empty()
    }
}

/// A single login attempt as seen by the risk evaluator.
///
/// Combines the submitted user identifier with the telemetry collected for
/// this submission. Built once per login, scored once, then discarded.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginAttempt {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub ip_address: String,
    pub geolocation: String,
    pub browser_fingerprint: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

impl LoginAttempt {
    pub fn new(
        user_id: impl Into<String>,
        ip_address: impl Into<String>,
        geolocation: impl Into<String>,
        browser_fingerprint: impl Into<String>,
    ) -> Self {
        LoginAttempt {
            id: Uuid::new_v4(),
            ip_address: ip_address.into(),
            geolocation: geolocation.into(),
            browser_fingerprint: browser_fingerprint.into(),
            user_id: user_id.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_presence() {
        assert!(LoginCredentials::new("rP9jPy123").is_present());
        assert!(!LoginCredentials::new("").is_present());
        assert!(!LoginCredentials::new("   ").is_present());
    }

    #[test]
    fn test_attempt_carries_all_fields() {
        let attempt = LoginAttempt::new(
            "rP9jPy123",
            "192.168.1.100",
            "New York, USA",
            "a1b2c3d4e5f6g7h8i9j0",
        );

        assert_eq!(attempt.user_id, "rP9jPy123");
        assert_eq!(attempt.ip_address, "192.168.1.100");
        assert_eq!(attempt.geolocation, "New York, USA");
        assert_eq!(attempt.browser_fingerprint, "a1b2c3d4e5f6g7h8i9j0");
    }

    #[test]
    fn test_attempt_serializes_camel_case() {
        let attempt = LoginAttempt::new("user-1", "1.2.3.4", "Berlin, DE", "ff00");
        let json = serde_json::to_value(&attempt).unwrap();

        assert!(json.get("ipAddress").is_some());
        assert!(json.get("browserFingerprint").is_some());
        assert!(json.get("userId").is_some());
    }
}
