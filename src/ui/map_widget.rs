use std::time::Duration;

use {eframe::egui::Color32, strum_macros::EnumIter, thiserror::Error};

use crate::{
    config::{MAP, TileConfig},
    domain::{Coordinate, LatLng, LatLngBounds, format_coordinate},
    ui::UI_TEXT,
};

/// Opaque id for one overlay drawn on a map widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LayerHandle(pub(crate) u64);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("Map layer rejected: {0}")]
    LayerRejected(String),
}

/// Declaration order is legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum MarkerKind {
    Start,
    End,
}

impl MarkerKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::Start => &UI_TEXT.legend_start,
            Self::End => &UI_TEXT.legend_current,
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Self::Start => MAP.markers.start_color,
            Self::End => MAP.markers.end_color,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub kind: MarkerKind,
    pub position: LatLng,
    pub popup: String,
}

impl MarkerSpec {
    pub fn new(kind: MarkerKind, at: Coordinate) -> Self {
        let position = LatLng::from(at);
        let popup = format!(
            "{}\nLat: {}\nLon: {}",
            kind.title(),
            format_coordinate(position.lat),
            format_coordinate(position.lon)
        );
        Self {
            kind,
            position,
            popup,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PolylineSpec {
    pub path: Vec<LatLng>,
    pub color: Color32,
    pub width: f32,
    pub opacity: f32,
    pub dash_length: f32,
}

impl PolylineSpec {
    /// Travel path in the configured style.
    pub fn travel_path(coords: &[Coordinate]) -> Self {
        Self {
            path: coords.iter().copied().map(LatLng::from).collect(),
            color: MAP.path.color,
            width: MAP.path.width,
            opacity: MAP.path.opacity,
            dash_length: MAP.path.dash_length,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Polyline(PolylineSpec),
    Marker(MarkerSpec),
}

impl Overlay {
    fn positions(&self) -> &[LatLng] {
        match self {
            Self::Polyline(p) => &p.path,
            Self::Marker(m) => std::slice::from_ref(&m.position),
        }
    }

    /// Rejects overlays a map cannot place (non-finite positions).
    pub fn validate(&self) -> Result<(), MapError> {
        match self
            .positions()
            .iter()
            .find(|p| !p.lat.is_finite() || !p.lon.is_finite())
        {
            Some(p) => Err(MapError::LayerRejected(format!(
                "non-finite position ({}, {})",
                p.lat, p.lon
            ))),
            None => Ok(()),
        }
    }
}

/// What the map surface needs from a map library.
pub trait MapWidget {
    fn set_view(&mut self, center: LatLng, zoom: u8);
    fn add_base_layer(&mut self, tiles: &'static TileConfig);
    /// Recompute the viewport size once `delay` has passed.
    fn invalidate_size_after(&mut self, delay: Duration);
    fn add_polyline(&mut self, polyline: PolylineSpec) -> Result<LayerHandle, MapError>;
    fn add_marker(&mut self, marker: MarkerSpec) -> Result<LayerHandle, MapError>;
    /// Unknown handles are ignored.
    fn remove_layer(&mut self, handle: LayerHandle);
    fn fit_bounds(&mut self, bounds: LatLngBounds, padding_px: f32);

    fn add_overlay(&mut self, overlay: Overlay) -> Result<LayerHandle, MapError> {
        match overlay {
            Overlay::Polyline(p) => self.add_polyline(p),
            Overlay::Marker(m) => self.add_marker(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn legend_lists_start_before_current() {
        let titles: Vec<_> = MarkerKind::iter().map(MarkerKind::title).collect();
        assert_eq!(titles, ["Start Location", "Current Location"]);
    }

    #[test]
    fn popup_shows_title_and_six_decimal_coordinates() {
        let m = MarkerSpec::new(MarkerKind::End, [-6.2088, 106.8456]);
        assert_eq!(m.popup, "Current Location\nLat: -6.208800\nLon: 106.845600");
        assert_eq!(m.position, LatLng::new(-6.2088, 106.8456));
    }

    #[test]
    fn travel_path_uses_configured_style() {
        let p = PolylineSpec::travel_path(&[[1.0, 2.0], [3.0, 4.0]]);
        assert_eq!(p.path, vec![LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)]);
        assert_eq!(p.color, Color32::from_rgb(0x66, 0x7e, 0xea));
        assert_eq!(p.width, 3.0);
        assert_eq!(p.opacity, 0.8);
    }

    #[test]
    fn non_finite_overlays_are_rejected() {
        let bad = Overlay::Marker(MarkerSpec::new(MarkerKind::Start, [f64::NAN, 1.0]));
        assert!(matches!(bad.validate(), Err(MapError::LayerRejected(_))));
        let good = Overlay::Polyline(PolylineSpec::travel_path(&[[1.0, 2.0]]));
        assert!(good.validate().is_ok());
    }
}
