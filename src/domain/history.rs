use serde::{Deserialize, Serialize};

use super::{Coordinate, TrackingPoint};

/// Envelope returned by the history endpoint. Order of `data` is the backend's.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackingHistoryResponse {
    #[serde(default)]
    pub data: Option<Vec<TrackingPoint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TrackingHistoryResponse {
    pub fn point_count(&self) -> usize {
        self.data.as_ref().map_or(0, Vec::len)
    }
}

/// Map-ready view of a history: `coordinates[i]` is `points[i]` as `[lat, lon]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapData {
    pub points: Vec<TrackingPoint>,
    pub coordinates: Vec<Coordinate>,
}

/// Never fails; an absent `data` field maps to empty sequences.
pub fn to_map_data(history: TrackingHistoryResponse) -> MapData {
    let points = history.data.unwrap_or_default();
    let coordinates = points.iter().map(TrackingPoint::coordinate).collect();
    MapData {
        points,
        coordinates,
    }
}
