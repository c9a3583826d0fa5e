//! View models mirrored from the portfolio API.
//!
//! Each resource has a loose `Wire*` shape that accepts whatever the backend
//! sends and a `from_wire` conversion that normalizes it exactly once.

pub mod analytics;
pub mod blog;
pub mod project;
pub mod skill;
pub mod upload;

pub use analytics::{AnalyticsSummary, ChartPoint, DailyStat};
pub use blog::{BlogPost, BlogPostUpdate, WireBlogPost};
pub use project::{Project, ProjectInput, ProjectStatus, ProjectTool, WireProject};
pub use skill::{Skill, SkillInput};
pub use upload::{UploadedFile, WireUpload};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Parses the timestamp formats the backend has been seen to emit.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Go's zero `time.Time` serializes as year 1; treat it as absent.
pub(crate) fn parse_optional_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(parse_timestamp).filter(|dt| dt.timestamp() > 0)
}

/// Accepts a string, number or null where the backend is inconsistent.
pub(crate) fn loose_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}

pub(crate) fn loose_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_u64().or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)).unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    })
}

pub(crate) fn loose_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    #[test]
    fn test_parse_timestamp_formats() {
        assert!(parse_timestamp("2024-05-01T10:00:00.000Z").is_some());
        assert!(parse_timestamp("2024-05-01T10:00:00+03:00").is_some());
        assert!(parse_timestamp("2024-05-01 10:00:00").is_some());
        assert_eq!(parse_timestamp("2024-05-01").map(|d| d.day()), Some(1));
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn test_zero_time_is_absent() {
        assert!(parse_optional_timestamp(Some("0001-01-01T00:00:00Z")).is_none());
    }
}
