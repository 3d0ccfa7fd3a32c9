//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Every HTTP request and its outcome.
    pub log_http: bool,

    /// Timer start/stop and each applied or discarded fetch outcome.
    pub log_polling: bool,

    /// Identity gate transitions.
    pub log_gate: bool,

    /// Layer removals/additions performed by the map surface.
    pub log_map_sync: bool,

    pub log_tiles: bool,
}

pub const DF: LogFlags = LogFlags {
    log_http: false,
    log_polling: true,
    log_gate: true,
    log_map_sync: false,
    log_tiles: false,
};
