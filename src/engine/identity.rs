use crate::{config::DF, data::TrackingSource, domain::UserValidationResult};

/// Message shown when validation fails for a reason other than a rejected user.
pub const UNEXPECTED_FAILURE: &str = "An error occurred";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateStatus {
    Unset,
    Validating,
    Valid,
    Invalid,
}

/// Holds the active user id and gates the tracking view behind it.
/// Validation runs elsewhere (a promise on the app side, or `submit` directly);
/// the gate only records what happened.
#[derive(Debug, Default, Clone)]
pub struct IdentityGate {
    user_id: String,
    is_validating: bool,
    error: Option<String>,
}

impl IdentityGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// The accepted user id, `None` while unset.
    pub fn user_id(&self) -> Option<&str> {
        if self.user_id.is_empty() {
            None
        } else {
            Some(&self.user_id)
        }
    }

    pub fn is_validating(&self) -> bool {
        self.is_validating
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn status(&self) -> GateStatus {
        if self.is_validating {
            GateStatus::Validating
        } else if !self.user_id.is_empty() {
            GateStatus::Valid
        } else if self.error.is_some() {
            GateStatus::Invalid
        } else {
            GateStatus::Unset
        }
    }

    /// Enter the validating state. Any previous error is dropped.
    pub fn begin_submit(&mut self) {
        self.is_validating = true;
        self.error = None;
    }

    /// Record a finished validation. Returns whether the user was accepted.
    /// A rejected id leaves the previously accepted id (if any) in place.
    pub fn finish_submit(&mut self, outcome: anyhow::Result<UserValidationResult>) -> bool {
        self.is_validating = false;

        match outcome {
            Ok(result) if result.is_valid => {
                if DF.log_gate {
                    log::info!(
                        "GATE: accepted '{}' ({} points)",
                        result.user_id,
                        result.point_count.unwrap_or_default()
                    );
                }
                self.user_id = result.user_id;
                self.error = None;
                true
            }
            Ok(result) => {
                let message = result
                    .error_message()
                    .unwrap_or_else(|| UNEXPECTED_FAILURE.to_string());
                if DF.log_gate {
                    log::info!("GATE: rejected '{}': {}", result.user_id, message);
                }
                self.error = Some(message);
                false
            }
            Err(e) => {
                log::error!("GATE: validation failed unexpectedly: {:#}", e);
                self.error = Some(UNEXPECTED_FAILURE.to_string());
                false
            }
        }
    }

    /// Validate `user_id` against `source` and record the outcome.
    pub async fn submit(&mut self, source: &dyn TrackingSource, user_id: &str) -> bool {
        self.begin_submit();
        let result = source.validate_user(user_id).await;
        self.finish_submit(Ok(result))
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Drop the accepted user ("Change User"). Returns to `Unset`.
    pub fn reset(&mut self) {
        if DF.log_gate && !self.user_id.is_empty() {
            log::info!("GATE: cleared user '{}'", self.user_id);
        }
        self.user_id.clear();
        self.error = None;
        self.is_validating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{ApiError, TrackingError},
        domain::{TrackingHistoryResponse, TrackingPoint},
    };
    use async_trait::async_trait;

    /// Users listed in `known` have one history record; everyone else has none.
    struct Directory {
        known: Vec<&'static str>,
        offline: bool,
    }

    #[async_trait]
    impl TrackingSource for Directory {
        async fn fetch_history(&self, user_id: &str) -> Result<TrackingHistoryResponse, TrackingError> {
            if self.offline {
                return Err(TrackingError::HistoryFetch(ApiError::Connection));
            }
            let data = if self.known.contains(&user_id) {
                vec![TrackingPoint {
                    id: "1".into(),
                    user_id: user_id.into(),
                    latitude: -6.2,
                    longitude: 106.8,
                    accuracy: None,
                    timestamp: "2025-01-01T08:00:00Z".into(),
                    location: None,
                }]
            } else {
                Vec::new()
            };
            Ok(TrackingHistoryResponse {
                data: Some(data),
                ..Default::default()
            })
        }
    }

    fn directory() -> Directory {
        Directory {
            known: vec!["user123", "alice"],
            offline: false,
        }
    }

    #[test]
    fn starts_unset() {
        let gate = IdentityGate::new();
        assert_eq!(gate.status(), GateStatus::Unset);
        assert!(gate.user_id().is_none());
        assert!(gate.error().is_none());
    }

    #[test]
    fn begin_submit_enters_validating_and_clears_error() {
        let mut gate = IdentityGate::new();
        gate.finish_submit(Err(anyhow::anyhow!("boom")));
        assert!(gate.error().is_some());

        gate.begin_submit();
        assert_eq!(gate.status(), GateStatus::Validating);
        assert!(gate.is_validating());
        assert!(gate.error().is_none());
    }

    #[tokio::test]
    async fn known_user_is_accepted() {
        let mut gate = IdentityGate::new();
        assert!(gate.submit(&directory(), "user123").await);
        assert_eq!(gate.status(), GateStatus::Valid);
        assert_eq!(gate.user_id(), Some("user123"));
        assert!(!gate.is_validating());
    }

    #[tokio::test]
    async fn unknown_user_is_rejected_and_stays_unset() {
        let mut gate = IdentityGate::new();
        assert!(!gate.submit(&directory(), "ghost").await);
        assert_eq!(gate.status(), GateStatus::Invalid);
        assert_eq!(gate.error(), Some("User Not Found"));
        assert!(gate.user_id().is_none());
    }

    #[tokio::test]
    async fn blank_id_reports_invalid_input() {
        let mut gate = IdentityGate::new();
        assert!(!gate.submit(&directory(), "  ").await);
        assert_eq!(gate.error(), Some("User ID must not be empty"));
    }

    #[tokio::test]
    async fn backend_outage_reads_as_user_not_found() {
        let source = Directory {
            known: vec!["user123"],
            offline: true,
        };
        let mut gate = IdentityGate::new();
        assert!(!gate.submit(&source, "user123").await);
        assert_eq!(gate.error(), Some("User Not Found"));
    }

    #[tokio::test]
    async fn failed_resubmit_keeps_the_previous_user() {
        let mut gate = IdentityGate::new();
        gate.submit(&directory(), "alice").await;
        gate.submit(&directory(), "ghost").await;
        assert_eq!(gate.user_id(), Some("alice"));
        assert_eq!(gate.error(), Some("User Not Found"));
    }

    #[test]
    fn unexpected_failure_uses_the_generic_message() {
        let mut gate = IdentityGate::new();
        gate.begin_submit();
        assert!(!gate.finish_submit(Err(anyhow::anyhow!("promise dropped"))));
        assert_eq!(gate.error(), Some(UNEXPECTED_FAILURE));
        assert!(!gate.is_validating());
    }

    #[tokio::test]
    async fn reset_returns_to_unset() {
        let mut gate = IdentityGate::new();
        gate.submit(&directory(), "user123").await;
        gate.reset();
        assert_eq!(gate.status(), GateStatus::Unset);
        assert!(gate.user_id().is_none());
    }

    #[tokio::test]
    async fn clear_error_keeps_user() {
        let mut gate = IdentityGate::new();
        gate.submit(&directory(), "ghost").await;
        gate.clear_error();
        assert_eq!(gate.status(), GateStatus::Unset);
    }
}
