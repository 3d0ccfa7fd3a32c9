//! Configuration module for the GeoFlow viewer.

// Can all be private now because we have a public re-export.
mod api;
mod debug;
mod map;
mod persistence;
mod polling;

// Re-export commonly used items
pub use api::{API, ApiConfig, ApiDefaults, BACKEND_URL_ENV};
pub use debug::DF;
pub use map::{MAP, MapConfig, MarkerStyle, PathStyle, TileConfig};
pub use persistence::PERSISTENCE;
pub use polling::{POLLING, PollingConfig};
