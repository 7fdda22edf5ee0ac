//! Login telemetry collection
//!
//! Supplies the network and device signals attached to each login attempt.
//! The values are trusted as-is downstream; a real deployment would plug in a
//! collector wired to the edge, the demo ships fixed sample data.

/// Signals collected for one login submission.
#[derive(Debug, Clone)]
pub struct TelemetrySample {
    pub ip_address: String,
    pub geolocation: String,
    pub browser_fingerprint: String,
}

/// Source of telemetry for login attempts.
pub trait TelemetryProvider: Send + Sync {
    fn sample(&self) -> TelemetrySample;
}

/// Provider that always returns the same sample.
pub struct StaticTelemetry {
    sample: TelemetrySample,
}

impl StaticTelemetry {
    pub fn new(
        ip_address: impl Into<String>,
        geolocation: impl Into<String>,
        browser_fingerprint: impl Into<String>,
    ) -> Self {
        StaticTelemetry {
            sample: TelemetrySample {
                ip_address: ip_address.into(),
                geolocation: geolocation.into(),
                browser_fingerprint: browser_fingerprint.into(),
            },
        }
    }
}

impl Default for StaticTelemetry {
    /// The demo sample: a LAN address, a fixed city, a fixed fingerprint.
    fn default() -> Self {
        StaticTelemetry::new("192.168.1.100", "New York, USA", "a1b2c3d4e5f6g7h8i9j0")
    }
}

impl TelemetryProvider for StaticTelemetry {
    fn sample(&self) -> TelemetrySample {
        self.sample.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_sample_is_stable() {
        let provider = StaticTelemetry::default();
        let first = provider.sample();
        let second = provider.sample();

        assert_eq!(first.ip_address, second.ip_address);
        assert_eq!(first.ip_address, "192.168.1.100");
        assert_eq!(first.geolocation, "New York, USA");
        assert_eq!(first.browser_fingerprint, "a1b2c3d4e5f6g7h8i9j0");
    }

    #[test]
    fn test_custom_sample_passes_through() {
        let provider = StaticTelemetry::new("10.0.0.7", "Lisbon, PT", "deadbeef");
        let sample = provider.sample();
        assert_eq!(sample.geolocation, "Lisbon, PT");
    }
}
