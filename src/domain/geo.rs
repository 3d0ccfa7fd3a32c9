use {
    itertools::Itertools,
    serde::{Deserialize, Serialize},
    std::f64::consts::PI,
};

/// `[latitude, longitude]`, the order every draw call expects.
pub type Coordinate = [f64; 2];

/// Web Mercator stops being usable past this latitude.
const MAX_MERCATOR_LAT: f64 = 85.051_128_78;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lon: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Normalised Web Mercator position: x grows east, y grows north, both in `0.0..=1.0`.
    pub fn to_world(self) -> [f64; 2] {
        let lat = self.lat.clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT).to_radians();
        let x = (self.lon + 180.0) / 360.0;
        let y = 0.5 + (PI / 4.0 + lat / 2.0).tan().ln() / (2.0 * PI);
        [x, y]
    }

    pub fn from_world(world: [f64; 2]) -> Self {
        let lon = world[0] * 360.0 - 180.0;
        let lat = ((world[1] - 0.5) * 2.0 * PI).sinh().atan().to_degrees();
        Self { lat, lon }
    }
}

impl From<Coordinate> for LatLng {
    fn from(c: Coordinate) -> Self {
        Self::new(c[0], c[1])
    }
}

/// Axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

impl LatLngBounds {
    /// `None` for an empty slice.
    pub fn from_coordinates(coords: &[Coordinate]) -> Option<Self> {
        let (min_lat, max_lat) = coords
            .iter()
            .map(|c| c[0])
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()?;
        let (min_lon, max_lon) = coords
            .iter()
            .map(|c| c[1])
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()?;
        Some(Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        })
    }

    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.min_lat, self.min_lon)
    }

    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.max_lat, self.max_lon)
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }
}

/// Six decimal places, as shown in marker popups.
pub fn format_coordinate(value: f64) -> String {
    format!("{:.6}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_cover_all_coordinates() {
        let coords = [[-6.2, 106.8], [-6.3, 106.9], [-6.1, 106.7]];
        let b = LatLngBounds::from_coordinates(&coords).unwrap();
        assert_eq!(b.min_lat, -6.3);
        assert_eq!(b.max_lat, -6.1);
        assert_eq!(b.min_lon, 106.7);
        assert_eq!(b.max_lon, 106.9);
    }

    #[test]
    fn single_coordinate_gives_degenerate_bounds() {
        let b = LatLngBounds::from_coordinates(&[[1.0, 2.0]]).unwrap();
        assert_eq!(b.south_west(), b.north_east());
    }

    #[test]
    fn empty_coordinates_have_no_bounds() {
        assert!(LatLngBounds::from_coordinates(&[]).is_none());
    }

    #[test]
    fn world_projection_round_trips_jakarta() {
        let p = LatLng::new(-6.2088, 106.8456);
        let back = LatLng::from_world(p.to_world());
        assert!((back.lat - p.lat).abs() < 1e-9);
        assert!((back.lon - p.lon).abs() < 1e-9);
    }

    #[test]
    fn world_origin_is_null_island_at_center() {
        let w = LatLng::new(0.0, 0.0).to_world();
        assert!((w[0] - 0.5).abs() < 1e-12);
        assert!((w[1] - 0.5).abs() < 1e-12);
        // north is up
        assert!(LatLng::new(10.0, 0.0).to_world()[1] > 0.5);
    }

    #[test]
    fn coordinates_format_with_six_decimals() {
        assert_eq!(format_coordinate(-6.2088), "-6.208800");
        assert_eq!(format_coordinate(106.845_612_345), "106.845612");
    }
}
