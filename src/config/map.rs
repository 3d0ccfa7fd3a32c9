use eframe::egui::Color32;
use std::time::Duration;

use crate::domain::LatLng;

pub struct TileConfig {
    /// `{z}`, `{x}` and `{y}` are substituted per tile.
    pub url_template: &'static str,
    pub attribution: &'static str,
    pub max_zoom: u8,
    pub tile_size_px: f32,
    /// Upper bound on tiles requested per frame (keeps a zoomed-out view cheap).
    pub max_tiles_per_frame: usize,
}

pub struct PathStyle {
    pub color: Color32,
    pub width: f32,
    pub opacity: f32,
    pub dash_length: f32,
}

pub struct MarkerStyle {
    pub start_color: Color32,
    pub end_color: Color32,
    pub outline: Color32,
    pub radius: f32,
    /// Pointer distance (screen px) at which a marker popup opens.
    pub hover_radius_px: f32,
}

pub struct MapConfig {
    pub default_center: LatLng,
    pub default_zoom: u8,
    pub fit_padding_px: f32,
    /// Delay before the post-mount size recalculation.
    pub invalidate_delay: Duration,
    pub tiles: TileConfig,
    pub path: PathStyle,
    pub markers: MarkerStyle,
}

pub const MAP: MapConfig = MapConfig {
    default_center: LatLng::new(-6.2088, 106.8456), // Jakarta
    default_zoom: 12,
    fit_padding_px: 50.0,
    invalidate_delay: Duration::from_millis(100),
    tiles: TileConfig {
        url_template: "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        attribution: "© OpenStreetMap contributors",
        max_zoom: 19,
        tile_size_px: 256.0,
        max_tiles_per_frame: 64,
    },
    path: PathStyle {
        color: Color32::from_rgb(0x66, 0x7e, 0xea),
        width: 3.0,
        opacity: 0.8,
        dash_length: 5.0,
    },
    markers: MarkerStyle {
        start_color: Color32::from_rgb(0x4c, 0xaf, 0x50),
        end_color: Color32::from_rgb(0xf4, 0x43, 0x36),
        outline: Color32::WHITE,
        radius: 8.0,
        hover_radius_px: 14.0,
    },
};
