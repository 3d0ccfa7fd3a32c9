// Domain types and value objects
mod geo;
mod history;
mod tracking_point;
mod validation;

// Re-export commonly used types to the world
pub use geo::{Coordinate, LatLng, LatLngBounds, format_coordinate};
pub use history::{MapData, TrackingHistoryResponse, to_map_data};
pub use tracking_point::{GeoPoint, TrackingPoint};
pub use validation::UserValidationResult;
