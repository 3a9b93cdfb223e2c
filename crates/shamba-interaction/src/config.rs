//! Runtime configuration for the backend client.
//!
//! Configuration priority: explicit constructor argument > `SHAMBA_API_URL`
//! environment variable > built-in default.

use std::env;

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";

/// Connection settings for the backend system of record.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend, without a trailing slash.
    pub base_url: String,
}

impl BackendConfig {
    /// Creates a configuration with an explicit base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    /// Loads configuration from the environment.
    ///
    /// Reads `SHAMBA_API_URL`, defaulting to `http://127.0.0.1:5000`.
    pub fn from_env() -> Self {
        let base_url = env::var("SHAMBA_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Self::new(base_url)
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_local_backend() {
        assert_eq!(BackendConfig::default().base_url, "http://127.0.0.1:5000");
    }

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let config = BackendConfig::new("http://example.com/");
        assert_eq!(config.base_url, "http://example.com");
    }
}
