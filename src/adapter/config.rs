//! Adapter Configuration
//!
//! Settings for the request/response boundary. Read from the environment
//! by the binary; tests build them directly.

/// Default request size limit (64 KiB).
pub const DEFAULT_MAX_REQUEST_BYTES: usize = 64 * 1024;

/// Adapter configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdapterConfig {
    /// Requests longer than this are answered 413 without parsing.
    pub max_request_bytes: usize,
    /// Attach the settlement receipt digest to successful responses.
    pub include_receipt: bool,
    /// Log level used when `RUST_LOG` is not set.
    pub log_level: String,
    /// Run the built-in demo rounds before serving.
    pub demo: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            include_receipt: false,
            log_level: "info".to_string(),
            demo: false,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    value == "true" || value == "1"
}

impl AdapterConfig {
    /// Create config from environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary key lookup.
    ///
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            max_request_bytes: lookup("LADDER_MAX_REQUEST_BYTES")
                .and_then(|v| v.trim().parse().ok())
                .filter(|bytes: &usize| *bytes > 0)
                .unwrap_or(defaults.max_request_bytes),
            include_receipt: lookup("LADDER_INCLUDE_RECEIPT")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.include_receipt),
            log_level: lookup("LADDER_LOG_LEVEL").unwrap_or(defaults.log_level),
            demo: lookup("LADDER_DEMO")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.demo),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: BTreeMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AdapterConfig::from_lookup(|_| None);

        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.max_request_bytes, 65536);
        assert!(!config.include_receipt);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides() {
        let config = AdapterConfig::from_lookup(lookup_from(&[
            ("LADDER_MAX_REQUEST_BYTES", "512"),
            ("LADDER_INCLUDE_RECEIPT", "true"),
            ("LADDER_LOG_LEVEL", "debug"),
            ("LADDER_DEMO", "1"),
        ]));

        assert_eq!(config.max_request_bytes, 512);
        assert!(config.include_receipt);
        assert_eq!(config.log_level, "debug");
        assert!(config.demo);
    }

    #[test]
    fn test_bad_values_fall_back() {
        let config = AdapterConfig::from_lookup(lookup_from(&[
            ("LADDER_MAX_REQUEST_BYTES", "lots"),
            ("LADDER_INCLUDE_RECEIPT", "yes please"),
        ]));

        assert_eq!(config.max_request_bytes, DEFAULT_MAX_REQUEST_BYTES);
        assert!(!config.include_receipt);

        let zero = AdapterConfig::from_lookup(lookup_from(&[("LADDER_MAX_REQUEST_BYTES", "0")]));
        assert_eq!(zero.max_request_bytes, DEFAULT_MAX_REQUEST_BYTES);
    }
}
