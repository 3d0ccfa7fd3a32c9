mod api_client;
mod tracking_service;

pub use {
    api_client::{ApiClient, ApiError, ApiErrorBody, RequestOptions},
    tracking_service::{HttpTrackingSource, TrackingError, TrackingSource},
};
