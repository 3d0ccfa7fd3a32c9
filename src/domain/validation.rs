use crate::data::TrackingError;

/// Outcome of one identity check. Not persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct UserValidationResult {
    pub is_valid: bool,
    /// Echo of the submitted id.
    pub user_id: String,
    pub error: Option<TrackingError>,
    pub point_count: Option<usize>,
}

impl UserValidationResult {
    pub fn valid(user_id: impl Into<String>, point_count: usize) -> Self {
        Self {
            is_valid: true,
            user_id: user_id.into(),
            error: None,
            point_count: Some(point_count),
        }
    }

    pub fn invalid(user_id: impl Into<String>, error: TrackingError) -> Self {
        Self {
            is_valid: false,
            user_id: user_id.into(),
            error: Some(error),
            point_count: None,
        }
    }

    /// Message shown by the gate.
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}
