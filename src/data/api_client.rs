use {
    reqwest::{
        Client, Method,
        header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue},
    },
    serde::{Deserialize, Serialize, de::DeserializeOwned},
    std::time::Duration,
    thiserror::Error,
};

use crate::config::{API, ApiConfig};

#[cfg(debug_assertions)]
use crate::config::DF;

/// Transport-level failures, normalised so callers never see a `reqwest::Error`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The host could not be reached at all.
    #[error("Connection to the server failed. Make sure the backend is running.")]
    Connection,

    #[error("Request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    /// Non-2xx response. `message` comes from the error body, or is `HTTP {status}`.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    /// Anything else reqwest reports (bad URL, TLS setup, ...).
    #[error("{0}")]
    Client(String),
}

/// Error payload the backend sends alongside a non-2xx status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub code: Option<String>,
}

/// Per-call overrides. Headers are merged over the fixed JSON headers.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: Vec::new(),
            body: None,
        }
    }
}

impl RequestOptions {
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Thin JSON client bound to one backend. One attempt per call, no retries.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(API.content_type));
        headers.insert(ACCEPT, HeaderValue::from_static(API.content_type));

        let http = Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            timeout: config.timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        self.request(endpoint, RequestOptions::default()).await
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);

        #[cfg(debug_assertions)]
        if DF.log_http {
            log::info!("HTTP {} {}", options.method, url);
        }

        let mut builder = self.http.request(options.method, &url);
        for (name, value) in &options.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &options.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| self.classify(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            // The body is best effort: an unreadable or non-JSON body falls back to the status code.
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .ok()
                .and_then(|body| body.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
            log::warn!("{} answered {}: {}", url, status.as_u16(), message);
            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| self.classify(&url, e))?;
        serde_json::from_slice(&bytes).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn classify(&self, url: &str, e: reqwest::Error) -> ApiError {
        if e.is_timeout() {
            log::warn!("{} timed out after {:?}", url, self.timeout);
            ApiError::Timeout(self.timeout)
        } else if e.is_connect() {
            log::error!("{} unreachable: {}", url, e);
            ApiError::Connection
        } else if e.is_decode() {
            ApiError::Decode(e.to_string())
        } else {
            log::error!("{} failed: {}", url, e);
            ApiError::Client(e.to_string())
        }
    }
}
