use chrono::{DateTime, Local, TimeZone};

/// Monotonic clock used for UI-side timers.
pub type AppInstant = std::time::Instant;

pub struct TimeUtils;

impl TimeUtils {
    pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";
    pub const STANDARD_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
    pub const NEVER: &str = "Never";

    /// Wall-clock time of day in the local zone, or "Never".
    pub fn time_of_day<Tz: TimeZone>(at: Option<&DateTime<Tz>>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        match at {
            Some(dt) => dt.format(Self::TIME_OF_DAY_FORMAT).to_string(),
            None => Self::NEVER.to_string(),
        }
    }

    /// Render a backend timestamp in local time. Unparseable input is returned as is.
    pub fn local_timestamp(raw: &str) -> String {
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => dt
                .with_timezone(&Local)
                .format(Self::STANDARD_TIME_FORMAT)
                .to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn missing_update_reads_never() {
        assert_eq!(TimeUtils::time_of_day::<Local>(None), "Never");
    }

    #[test]
    fn time_of_day_is_hours_minutes_seconds() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 1, 8, 5, 9).unwrap();
        assert_eq!(TimeUtils::time_of_day(Some(&dt)), "08:05:09");
    }

    #[test]
    fn unparseable_timestamps_pass_through() {
        assert_eq!(TimeUtils::local_timestamp("yesterday"), "yesterday");
    }

    #[test]
    fn rfc3339_timestamps_are_reformatted() {
        let s = TimeUtils::local_timestamp("2025-01-01T08:00:00Z");
        assert_eq!(s.len(), "2025-01-01 08:00:00".len());
        assert!(s.starts_with("2025-01-0") || s.starts_with("2024-12-31"));
    }
}
