use crate::{data::TrackingError, domain::MapData};

/// Identifies one history fetch. `session` changes whenever the bound user is cleared or
/// replaced; `token` grows monotonically across every fetch the poller ever issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchTicket {
    pub session: u64,
    pub token: u64,
}

/// Sent by fetch tasks, drained on the UI thread by `TrackingPoller::update`.
#[derive(Debug)]
pub(crate) enum FetchEvent {
    /// A timer-issued fetch went out. Manual refetches apply this directly.
    Started(FetchTicket),
    Finished(FetchTicket, Result<MapData, TrackingError>),
}
