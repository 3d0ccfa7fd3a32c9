mod phases;
mod root;
mod state;

pub(crate) use phases::PhaseView;
pub(crate) use state::{AppState, GateState, PendingValidation, TrackingState, UiPrefs};

pub use root::App;
