use serde::{Deserialize, Serialize};

use super::Coordinate;

/// GeoJSON point. `coordinates` is `[longitude, latitude]`, the reverse of [`Coordinate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

/// One recorded location sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingPoint {
    pub id: String,
    pub user_id: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accuracy: Option<f64>,
    pub timestamp: String,
    /// Mirrors latitude/longitude. Never read for drawing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl TrackingPoint {
    pub fn coordinate(&self) -> Coordinate {
        [self.latitude, self.longitude]
    }
}
