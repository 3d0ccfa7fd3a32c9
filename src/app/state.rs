// src/app/state.rs

use {
    poll_promise::Promise,
    serde::{Deserialize, Serialize},
};

use crate::domain::UserValidationResult;

pub(crate) type PendingValidation = Promise<anyhow::Result<UserValidationResult>>;

pub(crate) enum AppState {
    Gate(GateState),
    Tracking(TrackingState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Gate(GateState::default())
    }
}

#[derive(Default)]
pub(crate) struct GateState {
    pub(crate) pending: Option<PendingValidation>,
}

#[derive(Clone, Copy, Default)]
pub(crate) struct TrackingState;

/// UI preferences that survive restarts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub(crate) struct UiPrefs {
    pub(crate) sidebar_open: bool,
    /// What was last typed into the user id prompt.
    pub(crate) last_user_input: String,
}

impl Default for UiPrefs {
    fn default() -> Self {
        Self {
            sidebar_open: true,
            last_user_input: String::new(),
        }
    }
}
