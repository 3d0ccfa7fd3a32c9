use std::{collections::BTreeMap, time::Duration};

use {
    eframe::egui::{Align2, Color32, FontId, Id, Response, Ui, Vec2},
    egui_plot::{Plot, PlotBounds},
};

use crate::{
    config::{DF, TileConfig},
    domain::{LatLng, LatLngBounds},
    ui::{
        map_widget::{LayerHandle, MapError, MapWidget, MarkerSpec, Overlay, PolylineSpec},
        plot_layers::{LayerContext, MarkerLayer, PathLayer, PlotLayer, TileLayer},
    },
    utils::AppInstant,
};

/// Fallback tile edge before a base layer is attached.
const DEFAULT_TILE_PX: f64 = 256.0;

/// One slippy-map tile at zoom `z`; `y` counts rows from the north edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl TileId {
    pub fn url(&self, template: &str) -> String {
        template
            .replace("{z}", &self.z.to_string())
            .replace("{x}", &self.x.to_string())
            .replace("{y}", &self.y.to_string())
    }

    /// Center and edge length in world units (y grows north).
    pub fn world_rect(&self) -> ([f64; 2], f64) {
        let n = f64::from(1u32 << self.z);
        let size = 1.0 / n;
        let center = [
            (f64::from(self.x) + 0.5) * size,
            1.0 - (f64::from(self.y) + 0.5) * size,
        ];
        (center, size)
    }
}

/// Tiles covering the world rectangle `[min, max]` at the given zoom. Steps down
/// a zoom level while more than `max_tiles` would be needed.
pub fn visible_tiles(min: [f64; 2], max: [f64; 2], zoom: f64, tiles: &TileConfig) -> Vec<TileId> {
    let mut z = zoom.round().clamp(0.0, f64::from(tiles.max_zoom)) as u8;
    loop {
        let n = 1u32 << z;
        let nf = f64::from(n);
        let index = |v: f64| ((v * nf).floor().max(0.0) as u32).min(n - 1);

        let (x0, x1) = (index(min[0]), index(max[0]));
        // rows count from the north, world y from the south
        let (y0, y1) = (index(1.0 - max[1]), index(1.0 - min[1]));

        let count = (x1 - x0 + 1) as usize * (y1 - y0 + 1) as usize;
        if count <= tiles.max_tiles_per_frame || z == 0 {
            return (y0..=y1)
                .flat_map(|y| (x0..=x1).map(move |x| TileId { z, x, y }))
                .collect();
        }
        z -= 1;
    }
}

/// Zoom level at which a world span of `world_width` fills `width_px` pixels.
pub fn zoom_for_span(width_px: f64, world_width: f64, tile_px: f64) -> f64 {
    if world_width <= f64::EPSILON || width_px <= 0.0 {
        return 0.0;
    }
    (width_px / (tile_px * world_width)).log2()
}

/// Center and integer zoom that fit `bounds` into `size` minus `padding` on every side.
pub fn fit_view(bounds: &LatLngBounds, padding: f32, size: Vec2, tile_px: f64, max_zoom: u8) -> ([f64; 2], u8) {
    let sw = bounds.south_west().to_world();
    let ne = bounds.north_east().to_world();
    let center = [(sw[0] + ne[0]) / 2.0, (sw[1] + ne[1]) / 2.0];

    let avail_w = f64::from((size.x - 2.0 * padding).max(1.0));
    let avail_h = f64::from((size.y - 2.0 * padding).max(1.0));
    let span_w = (ne[0] - sw[0]).abs();
    let span_h = (ne[1] - sw[1]).abs();

    let fit = |avail: f64, span: f64| {
        if span <= f64::EPSILON {
            f64::INFINITY
        } else {
            zoom_for_span(avail, span, tile_px)
        }
    };
    let zoom = fit(avail_w, span_w)
        .min(fit(avail_h, span_h))
        .floor()
        .clamp(0.0, f64::from(max_zoom));
    (center, zoom as u8)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ViewRequest {
    Center { world: [f64; 2], zoom: u8 },
    Fit { bounds: LatLngBounds, padding: f32 },
}

impl ViewRequest {
    fn plot_bounds(&self, size: Vec2, tile_px: f64, max_zoom: u8) -> PlotBounds {
        let (center, zoom) = match *self {
            Self::Center { world, zoom } => (world, zoom),
            Self::Fit { bounds, padding } => fit_view(&bounds, padding, size, tile_px, max_zoom),
        };
        let world_per_px = 1.0 / (tile_px * f64::from(1u32 << zoom));
        let half_w = f64::from(size.x) * world_per_px / 2.0;
        let half_h = f64::from(size.y) * world_per_px / 2.0;
        PlotBounds::from_min_max(
            [center[0] - half_w, center[1] - half_h],
            [center[0] + half_w, center[1] + half_h],
        )
    }
}

/// Slippy map drawn with `egui_plot` in Web Mercator world units.
pub struct PlotMap {
    id: Id,
    tiles: Option<&'static TileConfig>,
    overlays: BTreeMap<LayerHandle, Overlay>,
    next_handle: u64,
    /// Applied on the next frame, then forgotten.
    pending_view: Option<ViewRequest>,
    /// Re-applied when a size recalculation fires.
    last_view: Option<ViewRequest>,
    invalidate_at: Option<AppInstant>,
}

impl PlotMap {
    pub fn new(id: impl std::hash::Hash) -> Self {
        Self {
            id: Id::new(id),
            tiles: None,
            overlays: BTreeMap::new(),
            next_handle: 0,
            pending_view: None,
            last_view: None,
            invalidate_at: None,
        }
    }

    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    fn tile_px(&self) -> f64 {
        self.tiles
            .map_or(DEFAULT_TILE_PX, |t| f64::from(t.tile_size_px))
    }

    fn max_zoom(&self) -> u8 {
        self.tiles.map_or(19, |t| t.max_zoom)
    }

    fn request_view(&mut self, view: ViewRequest) {
        self.pending_view = Some(view);
        self.last_view = Some(view);
    }

    fn insert(&mut self, overlay: Overlay) -> Result<LayerHandle, MapError> {
        overlay.validate()?;
        self.next_handle += 1;
        let handle = LayerHandle(self.next_handle);
        self.overlays.insert(handle, overlay);
        Ok(handle)
    }

    /// Draw the map into the remaining space of `ui`.
    pub fn show(&mut self, ui: &mut Ui) -> Response {
        let size = ui.available_size();

        if let Some(at) = self.invalidate_at {
            let now = AppInstant::now();
            if now >= at {
                self.invalidate_at = None;
                self.pending_view = self.last_view;
            } else {
                ui.ctx().request_repaint_after(at - now);
            }
        }

        let pending = self.pending_view.take();
        if pending.is_some() {
            ui.ctx().request_repaint();
        }
        let tile_px = self.tile_px();
        let max_zoom = self.max_zoom();

        let response = Plot::new(self.id)
            .width(size.x)
            .height(size.y)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .allow_double_click_reset(false)
            .label_formatter(|_, _| String::new())
            .show(ui, |plot_ui| {
                if let Some(view) = pending {
                    let target = view.plot_bounds(size, tile_px, max_zoom);
                    let (min, max) = (target.min(), target.max());
                    plot_ui.set_plot_bounds_x(min[0]..=max[0]);
                    plot_ui.set_plot_bounds_y(min[1]..=max[1]);
                }

                let bounds = plot_ui.plot_bounds();
                let ctx = LayerContext {
                    min: bounds.min(),
                    max: bounds.max(),
                    zoom: zoom_for_span(f64::from(size.x), bounds.width(), tile_px),
                    px_per_world: f64::from(size.x) / bounds.width().max(f64::EPSILON),
                    tiles: self.tiles,
                    overlays: &self.overlays,
                };

                let layers: [&dyn PlotLayer; 3] = [&TileLayer, &PathLayer, &MarkerLayer];
                for layer in layers {
                    layer.render(plot_ui, &ctx);
                }
            })
            .response;

        if let Some(tiles) = self.tiles {
            ui.painter().text(
                response.rect.right_bottom() - Vec2::new(4.0, 2.0),
                Align2::RIGHT_BOTTOM,
                tiles.attribution,
                FontId::proportional(11.0),
                Color32::from_gray(60),
            );
        }
        response
    }
}

impl MapWidget for PlotMap {
    fn set_view(&mut self, center: LatLng, zoom: u8) {
        self.request_view(ViewRequest::Center {
            world: center.to_world(),
            zoom: zoom.min(self.max_zoom()),
        });
    }

    fn add_base_layer(&mut self, tiles: &'static TileConfig) {
        if DF.log_tiles {
            log::info!("MAP: base layer {}", tiles.url_template);
        }
        self.tiles = Some(tiles);
    }

    fn invalidate_size_after(&mut self, delay: Duration) {
        self.invalidate_at = Some(AppInstant::now() + delay);
    }

    fn add_polyline(&mut self, polyline: PolylineSpec) -> Result<LayerHandle, MapError> {
        self.insert(Overlay::Polyline(polyline))
    }

    fn add_marker(&mut self, marker: MarkerSpec) -> Result<LayerHandle, MapError> {
        self.insert(Overlay::Marker(marker))
    }

    fn remove_layer(&mut self, handle: LayerHandle) {
        self.overlays.remove(&handle);
    }

    fn fit_bounds(&mut self, bounds: LatLngBounds, padding_px: f32) {
        self.request_view(ViewRequest::Fit {
            bounds,
            padding: padding_px,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAP;

    #[test]
    fn tile_url_substitutes_all_placeholders() {
        let t = TileId { z: 12, x: 3263, y: 2118 };
        assert_eq!(
            t.url(MAP.tiles.url_template),
            "https://tile.openstreetmap.org/12/3263/2118.png"
        );
    }

    #[test]
    fn whole_world_at_zoom_zero_is_one_tile() {
        let tiles = visible_tiles([0.0, 0.0], [1.0, 1.0], 0.0, &MAP.tiles);
        assert_eq!(tiles, vec![TileId { z: 0, x: 0, y: 0 }]);
    }

    #[test]
    fn jakarta_lands_in_the_expected_tile() {
        let w = LatLng::new(-6.2088, 106.8456).to_world();
        let tiles = visible_tiles(w, w, 12.0, &MAP.tiles);
        assert_eq!(tiles, vec![TileId { z: 12, x: 3263, y: 2118 }]);
    }

    #[test]
    fn tile_count_is_capped_by_stepping_out() {
        let tiles = visible_tiles([0.0, 0.0], [1.0, 1.0], 10.0, &MAP.tiles);
        assert!(tiles.len() <= MAP.tiles.max_tiles_per_frame);
        assert!(tiles.iter().all(|t| t.z < 10));
    }

    #[test]
    fn zoom_is_clamped_to_max_zoom() {
        let w = LatLng::new(0.0, 0.0).to_world();
        let tiles = visible_tiles(w, w, 25.0, &MAP.tiles);
        assert_eq!(tiles[0].z, MAP.tiles.max_zoom);
    }

    #[test]
    fn tile_world_rect_is_north_up() {
        let (center, size) = TileId { z: 1, x: 0, y: 0 }.world_rect();
        assert_eq!(size, 0.5);
        assert_eq!(center, [0.25, 0.75]);
    }

    #[test]
    fn zoom_for_span_matches_tile_scale() {
        // one tile wide at zoom 3 is 1/8 of the world
        assert!((zoom_for_span(256.0, 1.0 / 8.0, 256.0) - 3.0).abs() < 1e-9);
        assert_eq!(zoom_for_span(256.0, 0.0, 256.0), 0.0);
    }

    #[test]
    fn fit_view_of_a_single_point_uses_max_zoom() {
        let b = LatLngBounds::from_coordinates(&[[-6.2, 106.8]]).unwrap();
        let (center, zoom) = fit_view(&b, 50.0, Vec2::new(800.0, 600.0), 256.0, 19);
        assert_eq!(zoom, 19);
        let back = LatLng::from_world(center);
        assert!((back.lat + 6.2).abs() < 1e-9);
    }

    #[test]
    fn fit_view_keeps_bounds_inside_padding() {
        let b = LatLngBounds::from_coordinates(&[[-6.30, 106.70], [-6.10, 106.90]]).unwrap();
        let size = Vec2::new(800.0, 600.0);
        let (_, zoom) = fit_view(&b, 50.0, size, 256.0, 19);

        let span = b.north_east().to_world()[0] - b.south_west().to_world()[0];
        let px = span * 256.0 * f64::from(1u32 << zoom);
        assert!(px <= 700.0);
        // one level deeper would overflow
        assert!(px * 2.0 > 500.0);
    }

    #[test]
    fn overlays_are_added_and_removed_by_handle() {
        let mut map = PlotMap::new("test_map");
        let a = map
            .add_polyline(PolylineSpec::travel_path(&[[1.0, 1.0], [2.0, 2.0]]))
            .unwrap();
        let b = map
            .add_marker(MarkerSpec::new(crate::ui::map_widget::MarkerKind::Start, [1.0, 1.0]))
            .unwrap();
        assert_ne!(a, b);
        assert_eq!(map.overlay_count(), 2);
        map.remove_layer(a);
        map.remove_layer(a);
        assert_eq!(map.overlay_count(), 1);
    }

    #[test]
    fn non_finite_marker_is_rejected() {
        let mut map = PlotMap::new("test_map");
        let bad = MarkerSpec::new(crate::ui::map_widget::MarkerKind::End, [f64::INFINITY, 0.0]);
        assert!(map.add_marker(bad).is_err());
        assert_eq!(map.overlay_count(), 0);
    }
}
