use std::time::Duration;

use dealerbid_vehicle_data::{ResolverConfig, DEFAULT_MAX_PATTERN_EXEMPLARS};

pub const DEFAULT_STRUCTURED_API_URL: &str = "https://carapi.app/api";
pub const DEFAULT_PATTERN_API_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 10_000;

pub struct Config {
    /// Backend VIN decode endpoint; VIN decoding is disabled without it
    pub decode_url: Option<String>,
    pub structured_api_url: String,
    pub structured_api_token: Option<String>,
    pub pattern_api_url: String,
    pub request_timeout: Duration,
    pub resolver: ResolverConfig,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset and
    /// unparseable numbers fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let timeout_ms: u64 = var("VEHICLE_REQUEST_TIMEOUT_MS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        let max_pattern_exemplars: usize = var("VEHICLE_MAX_PATTERN_EXEMPLARS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_PATTERN_EXEMPLARS);

        Self {
            decode_url: var("VEHICLE_DECODE_URL"),
            structured_api_url: var("VEHICLE_STRUCTURED_API_URL")
                .unwrap_or_else(|| DEFAULT_STRUCTURED_API_URL.into()),
            structured_api_token: var("VEHICLE_STRUCTURED_API_TOKEN"),
            pattern_api_url: var("VEHICLE_PATTERN_API_URL")
                .unwrap_or_else(|| DEFAULT_PATTERN_API_URL.into()),
            request_timeout: Duration::from_millis(timeout_ms),
            resolver: ResolverConfig {
                max_pattern_exemplars,
                ..ResolverConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]);
        assert_eq!(config.decode_url, None);
        assert_eq!(config.structured_api_url, "https://carapi.app/api");
        assert_eq!(config.pattern_api_url, "https://vpic.nhtsa.dot.gov/api/vehicles");
        assert_eq!(config.request_timeout, Duration::from_millis(10_000));
        assert_eq!(config.resolver.max_pattern_exemplars, 3);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("VEHICLE_DECODE_URL", "http://localhost:3000/api/decode-vin"),
            ("VEHICLE_STRUCTURED_API_TOKEN", "secret"),
            ("VEHICLE_REQUEST_TIMEOUT_MS", "2500"),
            ("VEHICLE_MAX_PATTERN_EXEMPLARS", "5"),
        ]);
        assert_eq!(
            config.decode_url.as_deref(),
            Some("http://localhost:3000/api/decode-vin")
        );
        assert_eq!(config.structured_api_token.as_deref(), Some("secret"));
        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.resolver.max_pattern_exemplars, 5);
    }

    #[test]
    fn test_bad_numbers_and_blanks_fall_back() {
        let config = config(&[
            ("VEHICLE_REQUEST_TIMEOUT_MS", "soon"),
            ("VEHICLE_MAX_PATTERN_EXEMPLARS", "-1"),
            ("VEHICLE_DECODE_URL", "  "),
        ]);
        assert_eq!(config.request_timeout, Duration::from_millis(10_000));
        assert_eq!(config.resolver.max_pattern_exemplars, 3);
        assert_eq!(config.decode_url, None);
    }
}
