use eframe::egui::Context;

use crate::app::{App, phases::phase_view::PhaseView, state::{AppState, TrackingState}};

impl PhaseView for TrackingState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_tracking_state(ctx)
    }
}
