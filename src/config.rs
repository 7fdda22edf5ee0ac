use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the idyn demo
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scoring service endpoint
    pub scoring: ScoringConfig,
    /// Simulated collaborator latencies
    pub simulation: SimulationConfig,
}

/// Scoring service endpoint configuration
///
/// Points at any OpenAI-compatible chat completions API. The key itself is
/// read from the named environment variable, never from this file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base URL of the scoring service
    pub base_url: String,
    /// Chat completions path on that host
    pub chat_path: String,
    /// Model identifier to request
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Whole-call timeout in milliseconds
    pub timeout_ms: u64,
}

impl ScoringConfig {
    /// Full endpoint URL (base joined with the chat path).
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.chat_path)
    }

    /// The call timeout as a `Duration`.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Latencies for the mocked backend collaborators, in milliseconds
///
/// Defaults mirror the product demo's staged delays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Login completion (the mocked session backend)
    pub login_latency_ms: u64,
    /// Registration proof anchoring
    pub registration_latency_ms: u64,
    /// Ledger proof lookup
    pub verification_latency_ms: u64,
    /// Directory search
    pub search_latency_ms: u64,
}

impl SimulationConfig {
    pub fn login_latency(&self) -> Duration {
        Duration::from_millis(self.login_latency_ms)
    }

    pub fn registration_latency(&self) -> Duration {
        Duration::from_millis(self.registration_latency_ms)
    }

    pub fn verification_latency(&self) -> Duration {
        Duration::from_millis(self.verification_latency_ms)
    }

    pub fn search_latency(&self) -> Duration {
        Duration::from_millis(self.search_latency_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            scoring: ScoringConfig {
                base_url: "https://api.openai.com".to_string(),
                chat_path: "/v1/chat/completions".to_string(),
                model: "gpt-4o-mini".to_string(),
                api_key_env: "IDYN_SCORING_API_KEY".to_string(),
                timeout_ms: 4000,
            },
            simulation: SimulationConfig {
                login_latency_ms: 1000,
                registration_latency_ms: 2500,
                verification_latency_ms: 1500,
                search_latency_ms: 1000,
            },
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &PathBuf) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn to_file(&self, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_endpoint_join() {
        let config = Config::default();
        assert_eq!(
            config.scoring.endpoint_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_endpoint_join_tolerates_trailing_slash() {
        let mut scoring = Config::default().scoring;
        scoring.base_url = "http://localhost:8080/".to_string();
        assert_eq!(
            scoring.endpoint_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.scoring.model = "local-test-model".to_string();
        config.simulation.search_latency_ms = 0;
        config.to_file(&path).unwrap();

        let loaded = Config::from_file(&path).unwrap();
        assert_eq!(loaded.scoring.model, "local-test-model");
        assert_eq!(loaded.simulation.search_latency_ms, 0);
        assert_eq!(loaded.simulation.registration_latency_ms, 2500);
    }

    #[test]
    fn test_timeout_conversion() {
        let config = Config::default();
        assert_eq!(config.scoring.timeout(), Duration::from_millis(4000));
    }
}
