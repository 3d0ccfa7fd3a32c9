use chrono::{DateTime, Local};
use eframe::egui::{
    Align, Align2, Area, Button, Color32, Context, Id, Layout, Order, Rect, RichText, SidePanel,
    Spinner, TopBottomPanel, Ui, vec2,
};

use strum::IntoEnumIterator;

use crate::{
    config::MAP,
    ui::{MarkerKind, UI_CONFIG, UI_TEXT},
    utils::TimeUtils,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    ToggleSidebar,
    ChangeUser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SidebarAction {
    Refresh,
}

/// Top bar: sidebar toggle, title, change-user button, updating indicator.
pub fn render_navbar(
    ctx: &Context,
    user_id: &str,
    sidebar_open: bool,
    is_loading: bool,
) -> Option<NavAction> {
    let mut action = None;

    TopBottomPanel::top("navbar")
        .frame(UI_CONFIG.navbar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let (icon, hint) = if sidebar_open {
                    (&UI_TEXT.nav_hide_sidebar, &UI_TEXT.nav_hide_sidebar_hint)
                } else {
                    (&UI_TEXT.nav_show_sidebar, &UI_TEXT.nav_show_sidebar_hint)
                };
                if ui
                    .add(Button::new(RichText::new(icon.as_str()).size(18.0)))
                    .on_hover_text(hint.as_str())
                    .clicked()
                {
                    action = Some(NavAction::ToggleSidebar);
                }

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    let label = format!("{}  {}", UI_TEXT.nav_change_user, user_id);
                    if ui.button(RichText::new(label).strong()).clicked() {
                        action = Some(NavAction::ChangeUser);
                    }

                    if is_loading {
                        ui.label(
                            RichText::new(UI_TEXT.nav_updating.as_str())
                                .small()
                                .color(UI_CONFIG.colors.status_busy),
                        );
                        ui.add(Spinner::new().size(12.0));
                    }

                    ui.centered_and_justified(|ui| {
                        ui.heading(
                            RichText::new(UI_TEXT.app_title.as_str())
                                .strong()
                                .color(Color32::WHITE),
                        );
                    });
                });
            });
        });

    action
}

/// Statistics for the bound session.
pub struct SidebarStats<'a> {
    pub user_id: &'a str,
    pub location_count: usize,
    pub last_update: Option<&'a DateTime<Local>>,
    pub is_loading: bool,
}

pub fn render_sidebar(ctx: &Context, stats: &SidebarStats) -> Option<SidebarAction> {
    let mut action = None;

    SidePanel::left("tracking_sidebar")
        .frame(UI_CONFIG.side_panel_frame())
        .exact_width(UI_CONFIG.sidebar_width)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading(
                RichText::new(UI_TEXT.sb_heading.as_str())
                    .strong()
                    .color(UI_CONFIG.colors.accent),
            );
            ui.label(RichText::new(UI_TEXT.sb_subheading.as_str()).small());
            ui.add_space(16.0);

            ui.label(
                RichText::new(UI_TEXT.sb_statistics.as_str())
                    .small()
                    .strong()
                    .color(UI_CONFIG.colors.label),
            );
            ui.add_space(6.0);

            stat_card(ui, &UI_TEXT.sb_user, |ui| {
                ui.label(RichText::new(stats.user_id).monospace());
            });
            stat_card(ui, &UI_TEXT.sb_total_locations, |ui| {
                ui.label(
                    RichText::new(stats.location_count.to_string())
                        .size(22.0)
                        .strong()
                        .color(UI_CONFIG.colors.accent),
                );
            });
            stat_card(ui, &UI_TEXT.sb_last_update, |ui| {
                ui.label(RichText::new(TimeUtils::time_of_day(stats.last_update)).monospace());
            });
            stat_card(ui, &UI_TEXT.sb_status, |ui| {
                let (text, color) = if stats.is_loading {
                    (&UI_TEXT.sb_status_updating, UI_CONFIG.colors.status_busy)
                } else {
                    (&UI_TEXT.sb_status_connected, UI_CONFIG.colors.status_ok)
                };
                ui.label(RichText::new(format!("● {}", text)).color(color));
            });

            ui.add_space(8.0);
            if ui
                .add_enabled(!stats.is_loading, Button::new(UI_TEXT.sb_refresh.as_str()))
                .clicked()
            {
                action = Some(SidebarAction::Refresh);
            }

            ui.with_layout(Layout::bottom_up(Align::Center), |ui| {
                ui.label(RichText::new(UI_TEXT.sb_version.as_str()).small());
                ui.separator();
            });
        });

    action
}

fn stat_card(ui: &mut Ui, title: &str, body: impl FnOnce(&mut Ui)) {
    UI_CONFIG.overlay_frame().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(RichText::new(title).small().color(UI_CONFIG.colors.label));
        body(ui);
    });
    ui.add_space(6.0);
}

/// Shown below the map while the latest refresh failed.
pub fn render_error_banner(ctx: &Context, message: &str) {
    TopBottomPanel::bottom("error_banner")
        .frame(UI_CONFIG.banner_frame())
        .show(ctx, |ui| {
            ui.label(
                RichText::new(format!("{} {}", UI_TEXT.error_prefix, message))
                    .color(UI_CONFIG.colors.error_text),
            );
        });
}

/// Legend, loading badge and empty-state note drawn over the map rect.
pub fn render_map_overlays(ctx: &Context, map_rect: Rect, has_points: bool, is_loading: bool) {
    if has_points {
        Area::new(Id::new("map_legend"))
            .order(Order::Foreground)
            .pivot(Align2::RIGHT_BOTTOM)
            .fixed_pos(map_rect.right_bottom() - vec2(16.0, 24.0))
            .show(ctx, |ui| {
                UI_CONFIG.overlay_frame().show(ui, |ui| {
                    ui.label(RichText::new(UI_TEXT.legend_title.as_str()).strong());
                    for kind in MarkerKind::iter() {
                        legend_row(ui, RichText::new("●").color(kind.color()), kind.title());
                    }
                    legend_row(ui, RichText::new("━").color(MAP.path.color), &UI_TEXT.legend_path);
                });
            });
    }

    if !has_points && !is_loading {
        Area::new(Id::new("map_no_data"))
            .order(Order::Foreground)
            .pivot(Align2::CENTER_CENTER)
            .fixed_pos(map_rect.center())
            .show(ctx, |ui| {
                UI_CONFIG.overlay_frame().show(ui, |ui| {
                    ui.label(RichText::new(UI_TEXT.map_no_data.as_str()).italics());
                });
            });
    }

    if is_loading {
        Area::new(Id::new("map_loading"))
            .order(Order::Foreground)
            .pivot(Align2::CENTER_TOP)
            .fixed_pos(map_rect.center_top() + vec2(0.0, 12.0))
            .show(ctx, |ui| {
                UI_CONFIG.overlay_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add(Spinner::new().size(14.0));
                        ui.label(UI_TEXT.map_updating.as_str());
                    });
                });
            });
    }
}

fn legend_row(ui: &mut Ui, swatch: RichText, label: &str) {
    ui.horizontal(|ui| {
        ui.label(swatch.size(16.0));
        ui.label(RichText::new(label).small());
    });
}
