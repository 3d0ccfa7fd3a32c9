use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::{AppState, GateState}};

impl PhaseView for GateState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_gate_state(ctx, self)
    }
}
