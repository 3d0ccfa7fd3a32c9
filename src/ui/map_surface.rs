use crate::{
    config::{DF, MAP},
    domain::{Coordinate, LatLngBounds},
    ui::map_widget::{LayerHandle, MapError, MapWidget, MarkerKind, MarkerSpec, Overlay, PolylineSpec},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceState {
    Unloaded,
    LoadedEmpty,
    LoadedWithPath,
}

/// Overlays to drop and overlays to draw for one coordinate sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct RedrawPlan {
    pub remove: Vec<LayerHandle>,
    pub add: Vec<Overlay>,
    pub fit: Option<LatLngBounds>,
}

/// Empty `coords` plans a pure clear of everything previously drawn.
pub fn plan_redraw(prior: &[LayerHandle], coords: &[Coordinate]) -> RedrawPlan {
    let remove = prior.to_vec();
    let (Some(&first), Some(&last)) = (coords.first(), coords.last()) else {
        return RedrawPlan {
            remove,
            add: Vec::new(),
            fit: None,
        };
    };

    RedrawPlan {
        remove,
        add: vec![
            Overlay::Polyline(PolylineSpec::travel_path(coords)),
            Overlay::Marker(MarkerSpec::new(MarkerKind::Start, first)),
            Overlay::Marker(MarkerSpec::new(MarkerKind::End, last)),
        ],
        fit: LatLngBounds::from_coordinates(coords),
    }
}

/// Stale overlays go first. If any add fails the ones already added are removed again,
/// so the widget never keeps half a path.
fn apply_plan<W: MapWidget>(widget: &mut W, plan: RedrawPlan) -> Result<Vec<LayerHandle>, MapError> {
    for handle in plan.remove {
        widget.remove_layer(handle);
    }

    let mut added = Vec::with_capacity(plan.add.len());
    for overlay in plan.add {
        match widget.add_overlay(overlay) {
            Ok(handle) => added.push(handle),
            Err(e) => {
                for handle in added {
                    widget.remove_layer(handle);
                }
                return Err(e);
            }
        }
    }

    if let Some(bounds) = plan.fit {
        widget.fit_bounds(bounds, MAP.fit_padding_px);
    }
    Ok(added)
}

/// Owns one map widget and the overlays drawn on it.
pub struct MapSurface<W: MapWidget> {
    widget: Option<W>,
    drawn: Vec<LayerHandle>,
    synced_revision: Option<u64>,
}

impl<W: MapWidget> Default for MapSurface<W> {
    fn default() -> Self {
        Self {
            widget: None,
            drawn: Vec::new(),
            synced_revision: None,
        }
    }
}

impl<W: MapWidget> MapSurface<W> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SurfaceState {
        match (&self.widget, self.drawn.is_empty()) {
            (None, _) => SurfaceState::Unloaded,
            (Some(_), true) => SurfaceState::LoadedEmpty,
            (Some(_), false) => SurfaceState::LoadedWithPath,
        }
    }

    pub fn widget(&self) -> Option<&W> {
        self.widget.as_ref()
    }

    pub fn widget_mut(&mut self) -> Option<&mut W> {
        self.widget.as_mut()
    }

    /// Create and initialise the widget. Does nothing once loaded.
    pub fn load(&mut self, create: impl FnOnce() -> W) {
        if self.widget.is_some() {
            return;
        }
        let mut widget = create();
        widget.set_view(MAP.default_center, MAP.default_zoom);
        widget.add_base_layer(&MAP.tiles);
        widget.invalidate_size_after(MAP.invalidate_delay);
        self.widget = Some(widget);
        self.drawn.clear();
        self.synced_revision = None;

        if DF.log_map_sync {
            log::info!("MAP: loaded");
        }
    }

    /// Redraw if `revision` differs from the last one drawn. Unloaded surfaces wait.
    pub fn sync(&mut self, revision: u64, coords: &[Coordinate]) -> Result<(), MapError> {
        let Some(widget) = self.widget.as_mut() else {
            return Ok(());
        };
        if self.synced_revision == Some(revision) {
            return Ok(());
        }
        self.synced_revision = Some(revision);

        let prior = std::mem::take(&mut self.drawn);
        let plan = plan_redraw(&prior, coords);
        if DF.log_map_sync {
            log::info!(
                "MAP: revision {} removes {} adds {}",
                revision,
                plan.remove.len(),
                plan.add.len()
            );
        }
        self.drawn = apply_plan(widget, plan)?;
        Ok(())
    }

    /// Remove every overlay and hand back the widget.
    pub fn teardown(&mut self) -> Option<W> {
        let mut widget = self.widget.take()?;
        for handle in self.drawn.drain(..) {
            widget.remove_layer(handle);
        }
        self.synced_revision = None;
        Some(widget)
    }
}
