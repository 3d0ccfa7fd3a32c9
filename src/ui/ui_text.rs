use std::sync::LazyLock;

pub const ICON_MENU: &str = "≡";
pub const ICON_CLOSE: &str = "✕";
pub const ICON_USER: &str = "👤";
pub const ICON_REFRESH: &str = "⟳";
pub const ICON_WARNING: &str = "⚠";
pub const ICON_PIN: &str = "📍";
pub const ICON_CLOCK: &str = "🕐";
pub const ICON_CROSS: &str = "❌";
pub const ICON_CHECK: &str = "✓";

pub struct UiText {
    pub app_title: String,
    pub window_title: String,

    // --- Gate modal ---
    pub modal_title: String,
    pub modal_label: String,
    pub modal_signup_hint: String,
    pub modal_description: String,
    pub modal_placeholder: String,
    pub modal_clear: String,
    pub modal_submit: String,
    pub modal_validating: String,

    // --- Navbar ---
    pub nav_show_sidebar: String,
    pub nav_hide_sidebar: String,
    pub nav_show_sidebar_hint: String,
    pub nav_hide_sidebar_hint: String,
    pub nav_change_user: String,
    pub nav_updating: String,

    // --- Sidebar ---
    pub sb_heading: String,
    pub sb_subheading: String,
    pub sb_statistics: String,
    pub sb_total_locations: String,
    pub sb_last_update: String,
    pub sb_status: String,
    pub sb_status_updating: String,
    pub sb_status_connected: String,
    pub sb_user: String,
    pub sb_refresh: String,
    pub sb_version: String,

    // --- Map overlays ---
    pub legend_title: String,
    pub legend_start: String,
    pub legend_current: String,
    pub legend_path: String,
    pub map_updating: String,
    pub map_no_data: String,

    pub error_prefix: String,
    pub modal_error_prefix: String,
}

// THE SINGLETON
pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "GeoFlow".to_string(),
    window_title: "GeoFlow Tracker".to_string(),

    modal_title: "Input Your User ID".to_string(),
    modal_label: "User ID".to_string(),
    modal_signup_hint: "Before you can view your tracking data, create your tracker in the GeoFlow mobile app.".to_string(),
    modal_description: "Select a user to view tracking history".to_string(),
    modal_placeholder: "e.g., user123, john_doe".to_string(),
    modal_clear: "Clear".to_string(),
    modal_submit: format!("{} View Tracking", ICON_CHECK),
    modal_validating: format!("{} Loading...", ICON_CHECK),

    nav_show_sidebar: ICON_MENU.to_string(),
    nav_hide_sidebar: ICON_CLOSE.to_string(),
    nav_show_sidebar_hint: "Show sidebar".to_string(),
    nav_hide_sidebar_hint: "Hide sidebar".to_string(),
    nav_change_user: "Change".to_string(),
    nav_updating: "Updating...".to_string(),

    sb_heading: "GeoFlow".to_string(),
    sb_subheading: "Real-time GPS Tracker".to_string(),
    sb_statistics: "STATISTICS".to_string(),
    sb_total_locations: format!("{} Total Locations", ICON_PIN),
    sb_last_update: format!("{} Last Update", ICON_CLOCK),
    sb_status: "Status".to_string(),
    sb_status_updating: "Updating...".to_string(),
    sb_status_connected: "Connected".to_string(),
    sb_user: format!("{} User", ICON_USER),
    sb_refresh: format!("{} Refresh now", ICON_REFRESH),
    sb_version: format!("GeoFlow Tracker v{}", env!("CARGO_PKG_VERSION")),

    legend_title: "Legend".to_string(),
    legend_start: "Start Location".to_string(),
    legend_current: "Current Location".to_string(),
    legend_path: "Travel Path".to_string(),
    map_updating: "Updating...".to_string(),
    map_no_data: "No location data yet".to_string(),

    error_prefix: ICON_WARNING.to_string(),
    modal_error_prefix: ICON_CROSS.to_string(),
});
