//! ISO-8601 ⇄ epoch-seconds conversion at the public `Index` boundary.
//!
//! Internal types (`Sample`, `AggregateSample`) are keyed by raw epoch
//! seconds so the aggregation algebra never touches strings. Date strings
//! are decoded/encoded only when crossing `Index::put`/`Index::get`, and are
//! always interpreted as local wall-clock time with no explicit offset —
//! matching the reference implementation's `datetime.fromisoformat`/
//! `datetime.fromtimestamp(...).isoformat()` behaviour.

use chrono::{Local, NaiveDateTime, TimeZone};

use crate::error::{Error, Result};

const FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S"];

/// Parse an ISO-8601 local-time date string into epoch seconds.
pub fn parse_local(date: &str) -> Result<f64> {
    for fmt in FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(date, fmt) {
            let local = match Local.from_local_datetime(&naive).single() {
                Some(dt) => dt,
                None => Local
                    .from_local_datetime(&naive)
                    .earliest()
                    .ok_or_else(|| Error::DateParse(date.to_string()))?,
            };
            let secs = local.timestamp() as f64;
            let nanos = local.timestamp_subsec_nanos() as f64 / 1_000_000_000.0;
            return Ok(secs + nanos);
        }
    }
    Err(Error::DateParse(date.to_string()))
}

/// Format epoch seconds as an ISO-8601 local-time date string, omitting the
/// fractional part entirely when it is zero (matching Python's `isoformat`).
pub fn format_local(epoch_secs: f64) -> String {
    let whole = epoch_secs.floor() as i64;
    let frac_nanos = ((epoch_secs - epoch_secs.floor()) * 1_000_000_000.0).round() as u32;
    let dt = Local
        .timestamp_opt(whole, frac_nanos)
        .single()
        .unwrap_or_else(|| Local.timestamp_opt(whole, 0).unwrap());
    if frac_nanos == 0 {
        dt.format("%Y-%m-%dT%H:%M:%S").to_string()
    } else {
        dt.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_whole_seconds() {
        let secs = parse_local("2024-01-01T01:00:00").unwrap();
        assert_eq!(format_local(secs), "2024-01-01T01:00:00");
    }

    #[test]
    fn round_trips_fractional_seconds() {
        let secs = parse_local("2024-01-01T03:00:00.300000").unwrap();
        let back = format_local(secs);
        assert!(back.starts_with("2024-01-01T03:00:00."));
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_local("not-a-date").is_err());
    }
}
