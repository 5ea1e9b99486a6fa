use chrono::{DateTime, NaiveDateTime, Utc};

/// Parses the ISO-8601 timestamps the registration platform stores.
///
/// Timestamps with an offset (`2024-05-01T10:00:00Z`, `...+05:30`) are
/// converted to UTC. Timestamps without an offset are taken to be UTC.
pub fn parse_timestamp(timestamp: &str) -> Option<DateTime<Utc>> {
    let timestamp = timestamp.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(datetime.with_timezone(&Utc));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(timestamp, format).ok())
        .map(|naive| naive.and_utc())
}
