mod map_surface;
mod map_widget;
mod plot_layers;
mod plot_map;
mod screens;
mod ui_config;
mod ui_panels;
mod ui_text;

pub use map_surface::{MapSurface, RedrawPlan, SurfaceState, plan_redraw};
pub use map_widget::{
    LayerHandle, MapError, MapWidget, MarkerKind, MarkerSpec, Overlay, PolylineSpec,
};
pub use plot_map::{PlotMap, TileId, fit_view, visible_tiles, zoom_for_span};

pub(crate) use screens::{GateAction, render_gate};

pub(crate) use ui_config::{UI_CONFIG, UI_TEXT};
pub(crate) use ui_panels::{
    NavAction, SidebarAction, SidebarStats, render_error_banner, render_map_overlays,
    render_navbar, render_sidebar,
};
