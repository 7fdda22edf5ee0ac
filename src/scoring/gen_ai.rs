//! Generative-model risk scoring over HTTP
//!
//! Interpolates the attempt into a fraud-analysis instruction, posts it to an
//! OpenAI-compatible chat completions endpoint, and parses the reply content
//! as a JSON assessment. Any provider exposing that wire shape can be swapped
//! in through configuration.

use super::{RiskScoringClient, ScoringError};
use crate::config::ScoringConfig;
use crate::models::{LoginAttempt, RiskAssessment};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

/// Scoring client backed by a generative model.
pub struct GenAiScoringClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl GenAiScoringClient {
    /// Create a client for the given endpoint.
    ///
    /// `timeout` bounds the whole HTTP exchange; expiry surfaces as a
    /// [`ScoringError::Http`] and is treated like any other evaluation
    /// failure.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ScoringError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(GenAiScoringClient {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Build a client from configuration, reading the API key from the
    /// environment variable the config names.
    pub fn from_config(config: &ScoringConfig) -> Result<Self, ScoringError> {
        let api_key = std::env::var(&config.api_key_env).map_err(|_| {
            ScoringError::Configuration(format!(
                "environment variable {} is not set",
                config.api_key_env
            ))
        })?;

        Self::new(
            config.endpoint_url(),
            config.model.clone(),
            api_key,
            Duration::from_millis(config.timeout_ms),
        )
    }
}

#[async_trait]
impl RiskScoringClient for GenAiScoringClient {
    async fn score(&self, attempt: &LoginAttempt) -> Result<RiskAssessment, ScoringError> {
        let prompt = build_prompt(attempt);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "user", "content": prompt }
            ],
        });

        log::debug!(
            "Scoring login attempt {} for user '{}'",
            attempt.id,
            attempt.user_id
        );

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Status(status));
        }

        let reply: ChatReply = response.json().await?;
        let content = reply
            .choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
            .ok_or(ScoringError::MissingContent)?;

        let assessment = parse_reply_content(content)?;
        log::debug!(
            "Model scored attempt {} at {:.2} ({})",
            attempt.id,
            assessment.fraud_risk_score,
            assessment.recommendation
        );
        Ok(assessment)
    }
}

/// Render the fraud-analysis instruction for one attempt.
fn build_prompt(attempt: &LoginAttempt) -> String {
    format!(
        "You are a fraud detection expert analyzing user login behavior.\n\n\
         Based on the provided IP address, geolocation, and browser fingerprint, \
         assess the risk of fraud associated with this login attempt.\n\n\
         Assign a fraudRiskScore between 0 and 1, where 0 indicates very low risk \
         and 1 indicates very high risk.\n\n\
         Provide a recommendation to either flag or not flag the login attempt \
         for further review.\n\n\
         Consider factors such as:\n\
         - Unusual IP addresses or geolocation patterns for the user\n\
         - Discrepancies in the browser fingerprint\n\
         - Any other suspicious indicators\n\n\
         Return your analysis as a JSON object with exactly two keys: \
         \"fraudRiskScore\" (number) and \"recommendation\" (string).\n\n\
         IP Address: {}\n\
         Geolocation: {}\n\
         Browser Fingerprint: {}\n\
         User ID: {}\n",
        attempt.ip_address, attempt.geolocation, attempt.browser_fingerprint, attempt.user_id
    )
}

/// Parse reply content into a validated assessment.
///
/// Models regularly wrap the object in markdown fences or a sentence of
/// prose, so the parser cuts down to the outermost JSON object first.
fn parse_reply_content(content: &str) -> Result<RiskAssessment, ScoringError> {
    let payload = extract_json_payload(content);
    let assessment: RiskAssessment = serde_json::from_str(payload)?;

    if !assessment.has_normalized_score() {
        return Err(ScoringError::InvalidShape(format!(
            "fraudRiskScore {} is outside [0, 1]",
            assessment.fraud_risk_score
        )));
    }

    Ok(assessment)
}

/// Trim markdown fences and surrounding prose down to the JSON object.
fn extract_json_payload(content: &str) -> &str {
    let trimmed = content.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed);

    match (unfenced.find('{'), unfenced.rfind('}')) {
        (Some(start), Some(end)) if start < end => &unfenced[start..=end],
        _ => unfenced,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_attempt() -> LoginAttempt {
        LoginAttempt::new(
            "rP9jPy123",
            "192.168.1.100",
            "New York, USA",
            "a1b2c3d4e5f6g7h8i9j0",
        )
    }

    #[test]
    fn test_prompt_carries_every_field() {
        let prompt = build_prompt(&sample_attempt());

        assert!(prompt.contains("192.168.1.100"));
        assert!(prompt.contains("New York, USA"));
        assert!(prompt.contains("a1b2c3d4e5f6g7h8i9j0"));
        assert!(prompt.contains("rP9jPy123"));
        assert!(prompt.contains("fraudRiskScore"));
    }

    #[test]
    fn test_parse_plain_json() {
        let content = r#"{"fraudRiskScore": 0.35, "recommendation": "do not flag"}"#;
        let assessment = parse_reply_content(content).unwrap();
        assert_eq!(assessment.fraud_risk_score, 0.35);
    }

    #[test]
    fn test_parse_fenced_json() {
        let content = "```json\n{\"fraudRiskScore\": 0.9, \"recommendation\": \"flag\"}\n```";
        let assessment = parse_reply_content(content).unwrap();
        assert_eq!(assessment.fraud_risk_score, 0.9);
        assert_eq!(assessment.recommendation, "flag");
    }

    #[test]
    fn test_parse_json_wrapped_in_prose() {
        let content = "Here is my analysis:\n{\"fraudRiskScore\": 0.15, \"recommendation\": \"ok\"} \
                       Let me know if you need more detail.";
        let assessment = parse_reply_content(content).unwrap();
        assert_eq!(assessment.fraud_risk_score, 0.15);
    }

    #[test]
    fn test_out_of_range_score_rejected() {
        let content = r#"{"fraudRiskScore": 7.3, "recommendation": "flag"}"#;
        let err = parse_reply_content(content).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidShape(_)));
    }

    #[test]
    fn test_garbage_content_rejected() {
        let err = parse_reply_content("the login looks fine to me").unwrap_err();
        assert!(matches!(err, ScoringError::Serialization(_)));
    }

    #[test]
    fn test_missing_key_rejected() {
        let content = r#"{"recommendation": "flag"}"#;
        assert!(parse_reply_content(content).is_err());
    }

    #[test]
    fn test_extract_handles_bare_fences() {
        let content = "```\n{\"fraudRiskScore\": 0.5, \"recommendation\": \"ok\"}\n```";
        assert!(parse_reply_content(content).is_ok());
    }

    #[test]
    fn test_unset_api_key_env_rejected_at_build() {
        let mut scoring = crate::config::Config::default().scoring;
        scoring.api_key_env = "IDYN_KEY_THAT_IS_NEVER_SET".to_string();

        match GenAiScoringClient::from_config(&scoring) {
            Err(ScoringError::Configuration(msg)) => {
                assert!(msg.contains("IDYN_KEY_THAT_IS_NEVER_SET"))
            }
            _ => panic!("expected a configuration error"),
        }
    }
}
