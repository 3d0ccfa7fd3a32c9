use std::time::Duration;

/// Environment variable holding the backend base URL.
pub const BACKEND_URL_ENV: &str = "GEOFLOW_BACKEND_URL";

pub struct ApiDefaults {
    pub timeout_ms: u64,
    pub content_type: &'static str,
    pub history_path: &'static str,
}

pub const API: ApiDefaults = ApiDefaults {
    timeout_ms: 10_000,
    content_type: "application/json",
    history_path: "/api/v1/tracking/history/",
};

/// Runtime settings for the HTTP client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Prefix for every endpoint. An empty value makes requests relative (and therefore broken).
    pub base_url: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_millis(API.timeout_ms),
        }
    }

    /// CLI value first, then the environment, then the empty string.
    pub fn resolve(cli_value: Option<&str>) -> Self {
        let base_url = cli_value
            .map(str::to_owned)
            .or_else(|| std::env::var(BACKEND_URL_ENV).ok())
            .unwrap_or_default();
        Self::new(base_url)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn history_endpoint(user_id: &str) -> String {
        format!("{}{}", API.history_path, user_id)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_value_wins_over_everything() {
        let config = ApiConfig::resolve(Some("http://localhost:8080"));
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn history_endpoint_is_per_user() {
        assert_eq!(
            ApiConfig::history_endpoint("user123"),
            "/api/v1/tracking/history/user123"
        );
    }
}
