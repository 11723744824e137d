use crate::supabase::Row;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::Value;

/// Adds `time_left_seconds` to each row, counting down to its `delete_at`.
///
/// Past deadlines and rows without a readable `delete_at` report 0.
pub fn with_time_left(rows: Vec<Row>, now: DateTime<Utc>) -> Vec<Row> {
    rows.into_iter()
        .map(|mut row| {
            let left = row
                .get("delete_at")
                .and_then(Value::as_str)
                .and_then(parse_instant)
                .map_or(0, |deadline| (deadline - now).num_seconds().max(0));
            row.insert("time_left_seconds".to_string(), Value::from(left));
            row
        })
        .collect()
}

/// RFC 3339, or a bare `timestamp` column value read as UTC.
pub fn parse_instant(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}
