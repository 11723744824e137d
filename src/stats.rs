use crate::models::{EventCounts, EventKind, EventRecord, StatsResponse};
use crate::timeline::normalize_at;
pub use crate::timeline::MAX_DAYS;
use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use std::collections::BTreeMap;
use tracing::debug;

pub const DEFAULT_DAYS: u32 = 30;

/// Reads the `days` query value: missing, non-numeric and zero fall back to
/// the default, large values are capped.
pub fn resolve_days(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|days| *days > 0)
        .map_or(DEFAULT_DAYS, |days| days.min(MAX_DAYS))
}

/// Oldest instant the event source is asked for.
pub fn cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

pub fn build_stats(events: &[EventRecord], days: u32) -> StatsResponse {
    build_stats_at(events, days, &Local::now())
}

pub fn build_stats_at<Tz: TimeZone>(
    events: &[EventRecord],
    days: u32,
    now: &DateTime<Tz>,
) -> StatsResponse {
    let mut totals = EventCounts::default();
    let mut other_events: BTreeMap<String, u64> = BTreeMap::new();

    for event in events {
        match EventKind::parse(&event.event_type) {
            Some(kind) => totals.record(kind, event.member_count()),
            None => {
                debug!(event_type = %event.event_type, "unrecognised analytics event");
                *other_events.entry(event.event_type.clone()).or_default() += 1;
            }
        }
    }

    StatsResponse {
        totals,
        timeline: normalize_at(events, days, now),
        total: events.len() as u64,
        other_events,
        degraded: false,
    }
}

/// Zero-filled stats for when the event source cannot be reached.
pub fn degraded_stats(days: u32) -> StatsResponse {
    degraded_stats_at(days, &Local::now())
}

pub fn degraded_stats_at<Tz: TimeZone>(days: u32, now: &DateTime<Tz>) -> StatsResponse {
    let mut stats = build_stats_at(&[], days, now);
    stats.degraded = true;
    stats
}
