mod gate;

pub(crate) use gate::{GateAction, render_gate};
