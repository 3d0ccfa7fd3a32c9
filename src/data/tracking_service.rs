use {async_trait::async_trait, thiserror::Error};

use crate::{
    config::{ApiConfig, DF},
    data::{ApiClient, ApiError},
    domain::{TrackingHistoryResponse, UserValidationResult},
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackingError {
    #[error("User ID must not be empty")]
    InvalidInput,

    /// Zero history records, or any fetch failure while validating.
    #[error("User Not Found")]
    UserNotFound,

    #[error("Failed to fetch tracking history: {0}")]
    HistoryFetch(#[source] ApiError),
}

/// Abstract interface for reading a user's tracking history.
#[async_trait]
pub trait TrackingSource: Send + Sync {
    async fn fetch_history(&self, user_id: &str) -> Result<TrackingHistoryResponse, TrackingError>;

    /// A user exists iff their history holds at least one record.
    /// Fetch failures are reported as `UserNotFound`, never as transport errors.
    async fn validate_user(&self, user_id: &str) -> UserValidationResult {
        if user_id.trim().is_empty() {
            return UserValidationResult::invalid(user_id, TrackingError::InvalidInput);
        }

        match self.fetch_history(user_id).await {
            Ok(history) => {
                let point_count = history.point_count();
                if point_count == 0 {
                    UserValidationResult::invalid(user_id, TrackingError::UserNotFound)
                } else {
                    UserValidationResult::valid(user_id, point_count)
                }
            }
            Err(e) => {
                if DF.log_gate {
                    log::info!("Validation fetch for '{}' failed: {}", user_id, e);
                }
                UserValidationResult::invalid(user_id, TrackingError::UserNotFound)
            }
        }
    }
}

/// Backend-backed source: `GET {base}/api/v1/tracking/history/{user_id}`.
pub struct HttpTrackingSource {
    client: ApiClient,
}

impl HttpTrackingSource {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub fn from_config(config: ApiConfig) -> Result<Self, ApiError> {
        Ok(Self::new(ApiClient::new(config)?))
    }
}

#[async_trait]
impl TrackingSource for HttpTrackingSource {
    async fn fetch_history(&self, user_id: &str) -> Result<TrackingHistoryResponse, TrackingError> {
        self.client
            .get_json(&ApiConfig::history_endpoint(user_id))
            .await
            .map_err(TrackingError::HistoryFetch)
    }
}
