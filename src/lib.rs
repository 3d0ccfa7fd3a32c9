#![allow(clippy::collapsible_if)]
#![allow(clippy::type_complexity)]

// Core modules
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the history binary)
pub use app::App;
pub use config::{PERSISTENCE, POLLING};
pub use data::{ApiClient, HttpTrackingSource, TrackingSource};

// CLI argument parsing
use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Backend base URL (falls back to $GEOFLOW_BACKEND_URL)
    #[arg(long)]
    pub backend_url: Option<String>,

    /// Validate this user id on startup and open its tracking view
    #[arg(long)]
    pub user: Option<String>,

    /// Seconds between two history refreshes
    #[arg(long, default_value_t = POLLING.default_interval.as_secs(),
          value_parser = clap::value_parser!(u64).range(1..))]
    pub poll_secs: u64,
}

/// Main application entry point - creates the GUI app
/// This is the public API for the binary to call
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> anyhow::Result<App> {
    egui_extras::install_image_loaders(&cc.egui_ctx);
    App::new(cc, args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_to_the_configured_interval() {
        let cli = Cli::parse_from(["geoflow"]);
        assert_eq!(cli.poll_secs, 15);
        assert!(cli.backend_url.is_none());
        assert!(cli.user.is_none());
    }

    #[test]
    fn cli_accepts_overrides() {
        let cli = Cli::parse_from([
            "geoflow",
            "--backend-url",
            "http://localhost:8080",
            "--user",
            "user123",
            "--poll-secs",
            "5",
        ]);
        assert_eq!(cli.backend_url.as_deref(), Some("http://localhost:8080"));
        assert_eq!(cli.user.as_deref(), Some("user123"));
        assert_eq!(cli.poll_secs, 5);
    }

    #[test]
    fn zero_second_polling_is_refused() {
        assert!(Cli::try_parse_from(["geoflow", "--poll-secs", "0"]).is_err());
    }
}
