mod identity;
mod messages;
mod polling;

pub use identity::{GateStatus, IdentityGate};
pub use polling::{SessionState, TrackingPoller};

pub(crate) use messages::{FetchEvent, FetchTicket};
