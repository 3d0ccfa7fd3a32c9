use std::time::Duration;

pub struct PollingConfig {
    /// Time between two history fetches while a user is bound.
    pub default_interval: Duration,
    /// Start polling as soon as a user id is bound.
    pub auto_start: bool,
}

pub const POLLING: PollingConfig = PollingConfig {
    default_interval: Duration::from_secs(15),
    auto_start: true,
};
