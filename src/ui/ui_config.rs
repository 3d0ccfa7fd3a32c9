use eframe::egui::{Color32, CornerRadius, Frame, Margin, Stroke};

pub use crate::ui::ui_text::UI_TEXT;

/// UI Colors for consistent theming
#[derive(Clone, Copy, Default)]
pub struct UiColors {
    pub label: Color32,
    pub heading: Color32,
    pub accent: Color32,
    pub navbar: Color32,
    pub side_panel: Color32,
    pub central_panel: Color32,
    pub error_fill: Color32,
    pub error_text: Color32,
    pub status_ok: Color32,
    pub status_busy: Color32,
    pub overlay_fill: Color32,
}

/// Main UI configuration struct that holds all UI-related settings
#[derive(Default, Clone, Copy)]
pub struct UiConfig {
    pub colors: UiColors,
    pub sidebar_width: f32,
    pub modal_width: f32,
}

/// Global UI configuration instance
pub static UI_CONFIG: UiConfig = UiConfig {
    colors: UiColors {
        label: Color32::from_gray(70),
        heading: Color32::from_gray(30),
        accent: Color32::from_rgb(0x66, 0x7e, 0xea),
        navbar: Color32::from_rgb(0x66, 0x7e, 0xea),
        side_panel: Color32::from_rgb(248, 249, 250),
        central_panel: Color32::from_rgb(230, 230, 230),
        error_fill: Color32::from_rgb(0xfd, 0xec, 0xea),
        error_text: Color32::from_rgb(0xc6, 0x28, 0x28),
        status_ok: Color32::from_rgb(0x4c, 0xaf, 0x50),
        status_busy: Color32::from_rgb(0xff, 0x98, 0x00),
        overlay_fill: Color32::from_rgba_premultiplied(250, 250, 250, 235),
    },
    sidebar_width: 260.0,
    modal_width: 380.0,
};

impl UiConfig {
    /// Frame for the top navigation bar
    pub fn navbar_frame(&self) -> Frame {
        Frame {
            fill: self.colors.navbar,
            stroke: Stroke::NONE,
            inner_margin: Margin::symmetric(12, 8),
            ..Default::default()
        }
    }

    /// Frame for the left sidebar (Standard padding)
    pub fn side_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.side_panel,
            stroke: Stroke::new(1.0, Color32::from_gray(220)),
            inner_margin: Margin::same(12),
            ..Default::default()
        }
    }

    /// Frame for the map area. No margin so tiles reach the edges.
    pub fn central_panel_frame(&self) -> Frame {
        Frame {
            fill: self.colors.central_panel,
            stroke: Stroke::NONE,
            inner_margin: Margin::ZERO,
            ..Default::default()
        }
    }

    /// Frame for the error banner under the map (Tighter vertical padding)
    pub fn banner_frame(&self) -> Frame {
        Frame {
            fill: self.colors.error_fill,
            stroke: Stroke::new(1.0, self.colors.error_text),
            inner_margin: Margin::symmetric(12, 6),
            ..Default::default()
        }
    }

    /// Frame for floating overlays on the map (legend, loading badge)
    pub fn overlay_frame(&self) -> Frame {
        Frame {
            fill: self.colors.overlay_fill,
            stroke: Stroke::new(1.0, Color32::from_gray(200)),
            inner_margin: Margin::same(8),
            corner_radius: CornerRadius::same(6),
            ..Default::default()
        }
    }
}
