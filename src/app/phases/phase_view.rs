use eframe::egui::Context;

use crate::app::{App, state::AppState};

/// One screen of the app. `tick` draws a frame and returns the phase for the next one.
pub(crate) trait PhaseView {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState;
}
