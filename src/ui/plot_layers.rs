use std::collections::BTreeMap;

use eframe::egui::{
    Id, LayerId, Order::Tooltip, RichText, SizeHint, TextureOptions, Ui, Vec2, load::TexturePoll,
};

#[allow(deprecated)]
use eframe::egui::show_tooltip_at_pointer;

use egui_plot::{Line, LineStyle, MarkerShape, PlotImage, PlotPoint, PlotPoints, PlotUi, Points};

use crate::{
    config::{DF, MAP, TileConfig},
    ui::{
        map_widget::{LayerHandle, MarkerSpec, Overlay},
        plot_map::visible_tiles,
    },
};

/// Per-frame view of the map handed to every layer.
pub struct LayerContext<'a> {
    /// Visible world rectangle.
    pub min: [f64; 2],
    pub max: [f64; 2],
    /// Continuous zoom of the current view.
    pub zoom: f64,
    pub px_per_world: f64,
    pub tiles: Option<&'static TileConfig>,
    pub overlays: &'a BTreeMap<LayerHandle, Overlay>,
}

/// A standardized layer in the map stack.
pub trait PlotLayer {
    fn render(&self, ui: &mut PlotUi, ctx: &LayerContext);
}

// ============================================================================
// 1. TILE LAYER (OpenStreetMap raster tiles)
// ============================================================================
pub struct TileLayer;

impl PlotLayer for TileLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let Some(tiles) = ctx.tiles else { return };
        let egui_ctx = plot_ui.ctx().clone();

        for tile in visible_tiles(ctx.min, ctx.max, ctx.zoom, tiles) {
            let url = tile.url(tiles.url_template);
            // Loaders fetch in the background and request a repaint when done.
            match egui_ctx.try_load_texture(&url, TextureOptions::LINEAR, SizeHint::default()) {
                Ok(TexturePoll::Ready { texture }) => {
                    let (center, size) = tile.world_rect();
                    plot_ui.image(PlotImage::new(
                        "",
                        texture.id,
                        PlotPoint::new(center[0], center[1]),
                        Vec2::splat(size as f32),
                    ));
                }
                Ok(TexturePoll::Pending { .. }) => {}
                Err(e) => {
                    if DF.log_tiles {
                        log::warn!("MAP: tile {} failed: {}", url, e);
                    }
                }
            }
        }
    }
}

// ============================================================================
// 2. PATH LAYER (dashed travel path)
// ============================================================================
pub struct PathLayer;

impl PlotLayer for PathLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        for overlay in ctx.overlays.values() {
            let Overlay::Polyline(path) = overlay else { continue };
            let points: Vec<[f64; 2]> = path.path.iter().map(|p| p.to_world()).collect();
            plot_ui.line(
                Line::new("", PlotPoints::new(points))
                    .color(path.color.gamma_multiply(path.opacity))
                    .width(path.width)
                    .style(LineStyle::Dashed {
                        length: path.dash_length,
                    }),
            );
        }
    }
}

// ============================================================================
// 3. MARKER LAYER (start / current location, popup on hover)
// ============================================================================
pub struct MarkerLayer;

impl PlotLayer for MarkerLayer {
    fn render(&self, plot_ui: &mut PlotUi, ctx: &LayerContext) {
        let markers: Vec<&MarkerSpec> = ctx
            .overlays
            .values()
            .filter_map(|o| match o {
                Overlay::Marker(m) => Some(m),
                Overlay::Polyline(_) => None,
            })
            .collect();

        for marker in &markers {
            let at = marker.position.to_world();
            // Outline
            plot_ui.points(
                Points::new("", PlotPoints::new(vec![at]))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(MAP.markers.radius + 2.0)
                    .color(MAP.markers.outline),
            );
            plot_ui.points(
                Points::new("", PlotPoints::new(vec![at]))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(MAP.markers.radius)
                    .color(marker.kind.color()),
            );
        }

        if let Some(marker) = hovered_marker(plot_ui, ctx, &markers) {
            show_popup(plot_ui, marker);
        }
    }
}

// ============================================================================
// HELPER FUNCTIONS (Private to this module)
// ============================================================================

/// Closest marker within the hover radius. Later markers win ties so the end marker
/// stays reachable when both sit on the same spot.
fn hovered_marker<'m>(
    plot_ui: &PlotUi,
    ctx: &LayerContext,
    markers: &[&'m MarkerSpec],
) -> Option<&'m MarkerSpec> {
    let pointer = plot_ui.pointer_coordinate()?;
    markers
        .iter()
        .map(|m| {
            let at = m.position.to_world();
            let dist_px = (at[0] - pointer.x).hypot(at[1] - pointer.y) * ctx.px_per_world;
            (*m, dist_px)
        })
        .filter(|(_, d)| *d <= f64::from(MAP.markers.hover_radius_px))
        .min_by(|a, b| a.1.total_cmp(&b.1).then(std::cmp::Ordering::Greater))
        .map(|(m, _)| m)
}

fn show_popup(plot_ui: &PlotUi, marker: &MarkerSpec) {
    let tooltip_layer = LayerId::new(Tooltip, Id::new("map_marker_popups"));
    let mut lines = marker.popup.lines();

    #[allow(deprecated)]
    show_tooltip_at_pointer(
        plot_ui.ctx(),
        tooltip_layer,
        Id::new(("marker_popup", marker.kind.title())),
        |ui: &mut Ui| {
            if let Some(title) = lines.next() {
                ui.label(RichText::new(title).strong().color(marker.kind.color()));
            }
            for line in lines {
                ui.label(RichText::new(line).monospace());
            }
        },
    );
}
