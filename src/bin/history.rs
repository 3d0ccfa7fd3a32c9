use anyhow::{Context, Result, bail};
use clap::Parser;
use tabled::{Table, Tabled, settings::Style};

use geoflow::{
    config::ApiConfig,
    data::{HttpTrackingSource, TrackingSource},
    domain::{LatLngBounds, TrackingPoint, format_coordinate, to_map_data},
    utils::TimeUtils,
};

/// Print one user's location history as a table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// User whose history is fetched
    user_id: String,

    /// Backend base URL (falls back to $GEOFLOW_BACKEND_URL)
    #[arg(long)]
    backend_url: Option<String>,

    /// Only print the most recent N records
    #[arg(long)]
    last: Option<usize>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Timestamp")]
    timestamp: String,
    #[tabled(rename = "Latitude")]
    latitude: String,
    #[tabled(rename = "Longitude")]
    longitude: String,
    #[tabled(rename = "Accuracy (m)")]
    accuracy: String,
}

impl HistoryRow {
    fn new(index: usize, point: &TrackingPoint) -> Self {
        Self {
            index,
            timestamp: TimeUtils::local_timestamp(&point.timestamp),
            latitude: format_coordinate(point.latitude),
            longitude: format_coordinate(point.longitude),
            accuracy: point
                .accuracy
                .map_or_else(|| "-".to_string(), |a| format!("{:.1}", a)),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let user_id = args.user_id.trim();
    if user_id.is_empty() {
        bail!("user id must not be empty");
    }

    let source = HttpTrackingSource::from_config(ApiConfig::resolve(args.backend_url.as_deref()))
        .context("failed to build the HTTP client")?;
    let history = source
        .fetch_history(user_id)
        .await
        .with_context(|| format!("could not load history for '{}'", user_id))?;

    let map_data = to_map_data(history);
    if map_data.points.is_empty() {
        println!("No location records for '{}'.", user_id);
        return Ok(());
    }

    let skip = args
        .last
        .map_or(0, |n| map_data.points.len().saturating_sub(n));
    let rows: Vec<HistoryRow> = map_data
        .points
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(i, p)| HistoryRow::new(i + 1, p))
        .collect();

    println!("{}", Table::new(rows).with(Style::rounded()));
    println!("Total locations: {}", map_data.points.len());
    if let Some(bounds) = LatLngBounds::from_coordinates(&map_data.coordinates) {
        println!(
            "Bounds: lat {} .. {}, lon {} .. {}",
            format_coordinate(bounds.min_lat),
            format_coordinate(bounds.max_lat),
            format_coordinate(bounds.min_lon),
            format_coordinate(bounds.max_lon)
        );
    }
    Ok(())
}
