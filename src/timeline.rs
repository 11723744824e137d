//! Dense, gap-free timelines for the analytics chart.
//!
//! Source rows are sparse: a day without events has no row at all. The chart
//! needs one point per step, so every day (or every minute of today for a
//! single-day range) in the window gets a bucket, zero-filled when absent.

use crate::models::{EventCounts, EventKind, EventRecord, TimelineBucket};
use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use std::collections::BTreeMap;

/// Longest window a timeline covers; larger ranges are clamped to it.
pub const MAX_DAYS: u32 = 365;

pub fn normalize(events: &[EventRecord], range_days: u32) -> Vec<TimelineBucket> {
    normalize_at(events, range_days, &Local::now())
}

/// Builds the timeline for the window ending at `now`, in `now`'s time zone.
///
/// The range is clamped to `1..=MAX_DAYS`.
pub fn normalize_at<Tz: TimeZone>(
    events: &[EventRecord],
    range_days: u32,
    now: &DateTime<Tz>,
) -> Vec<TimelineBucket> {
    let range_days = range_days.clamp(1, MAX_DAYS);
    let by_day = daily_counts(events, &now.timezone());
    let today = now.date_naive();

    if range_days == 1 {
        let today_total = by_day.get(&today).copied().unwrap_or_default();
        minute_window(today, now.naive_local(), today_total)
    } else {
        day_window(today, range_days, &by_day)
    }
}

/// Folds events into per-day counters keyed by local calendar day.
///
/// Unrecognised event types are skipped.
pub fn daily_counts<Tz: TimeZone>(
    events: &[EventRecord],
    tz: &Tz,
) -> BTreeMap<NaiveDate, EventCounts> {
    let mut days: BTreeMap<NaiveDate, EventCounts> = BTreeMap::new();
    for event in events {
        let Some(kind) = EventKind::parse(&event.event_type) else {
            continue;
        };
        let day = event.created_at.with_timezone(tz).date_naive();
        days.entry(day).or_default().record(kind, event.member_count());
    }
    days
}

fn day_window(
    today: NaiveDate,
    range_days: u32,
    by_day: &BTreeMap<NaiveDate, EventCounts>,
) -> Vec<TimelineBucket> {
    let mut buckets = Vec::with_capacity(range_days as usize);
    for offset in (0..range_days).rev() {
        let date = today - Duration::days(i64::from(offset));
        buckets.push(TimelineBucket {
            date: date_key(date),
            counts: by_day.get(&date).copied().unwrap_or_default(),
        });
    }
    buckets
}

// Source data is day-granular, so today's totals land on the final minute and
// every earlier minute stays at zero. This is an approximation, not an
// intraday breakdown.
fn minute_window(today: NaiveDate, now: NaiveDateTime, today_total: EventCounts) -> Vec<TimelineBucket> {
    let midnight = today.and_time(NaiveTime::MIN);
    let minutes = (now - midnight).num_minutes().max(0);

    let mut buckets: Vec<TimelineBucket> = (0..=minutes)
        .map(|minute| TimelineBucket {
            date: minute_key(midnight + Duration::minutes(minute)),
            counts: EventCounts::default(),
        })
        .collect();

    if let Some(last) = buckets.last_mut() {
        last.counts = today_total;
    }
    buckets
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

fn minute_key(at: NaiveDateTime) -> String {
    at.format("%Y-%m-%dT%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 5, 12, 30, 0).unwrap()
    }

    fn event(at: DateTime<Utc>, event_type: &str) -> EventRecord {
        EventRecord {
            created_at: at,
            event_type: event_type.to_string(),
            event_data: None,
        }
    }

    fn members(at: DateTime<Utc>, count: u64) -> EventRecord {
        EventRecord {
            created_at: at,
            event_type: "member_count".to_string(),
            event_data: Some(json!({ "count": count })),
        }
    }

    #[test]
    fn day_window_covers_every_day_once_in_order() {
        let timeline = normalize_at(&[], 7, &now());
        assert_eq!(timeline.len(), 7);
        assert_eq!(timeline.first().unwrap().date, "2025-12-30");
        assert_eq!(timeline.last().unwrap().date, "2026-01-05");
        for pair in timeline.windows(2) {
            assert!(pair[0].date < pair[1].date);
        }
    }

    #[test]
    fn empty_input_yields_zero_filled_window() {
        let timeline = normalize_at(&[], 30, &now());
        assert_eq!(timeline.len(), 30);
        assert!(timeline.iter().all(|bucket| bucket.counts.is_zero()));
    }

    #[test]
    fn member_count_and_wipe_share_a_day_bucket() {
        let at = now() - Duration::days(2);
        let events = vec![members(at, 42), event(at, "wipe_created")];

        let timeline = normalize_at(&events, 7, &now());
        let bucket = timeline
            .iter()
            .find(|bucket| bucket.date == "2026-01-03")
            .expect("missing day");
        assert_eq!(
            bucket.counts,
            EventCounts {
                wipe_created: 1,
                member_count: 42,
                ..EventCounts::default()
            }
        );
        let zero_days = timeline.iter().filter(|bucket| bucket.counts.is_zero()).count();
        assert_eq!(zero_days, 6);
    }

    #[test]
    fn member_only_day_keeps_other_counters_at_zero() {
        let events = vec![members(now(), 7), members(now(), 9)];
        let timeline = normalize_at(&events, 3, &now());
        let today = timeline.last().unwrap();
        assert_eq!(today.counts.member_count, 9);
        assert_eq!(today.counts.wipe_created, 0);
        assert_eq!(today.counts.channel_deleted, 0);
    }

    #[test]
    fn events_outside_the_window_are_not_emitted() {
        let events = vec![event(now() - Duration::days(10), "ticket_created")];
        let timeline = normalize_at(&events, 3, &now());
        assert!(timeline.iter().all(|bucket| bucket.counts.is_zero()));
    }

    #[test]
    fn unknown_event_types_do_not_break_the_walk() {
        let events = vec![event(now(), "message_pinned"), event(now(), "ticket_created")];
        let timeline = normalize_at(&events, 2, &now());
        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline[1].counts.ticket_created, 1);
    }

    #[test]
    fn single_day_range_emits_minutes_with_totals_on_the_last() {
        let events = vec![
            event(now() - Duration::hours(3), "wipe_created"),
            event(now() - Duration::hours(1), "channel_deleted"),
            event(now() - Duration::days(1), "wipe_created"),
        ];
        let timeline = normalize_at(&events, 1, &now());

        assert_eq!(timeline.len(), 12 * 60 + 30 + 1);
        assert_eq!(timeline[0].date, "2026-01-05T00:00");
        let (last, earlier) = timeline.split_last().unwrap();
        assert_eq!(last.date, "2026-01-05T12:30");
        assert_eq!(last.counts.wipe_created, 1);
        assert_eq!(last.counts.channel_deleted, 1);
        assert!(earlier.iter().all(|bucket| bucket.counts.is_zero()));
    }

    #[test]
    fn single_day_range_at_midnight_has_one_bucket() {
        let midnight = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
        let timeline = normalize_at(&[event(midnight, "ticket_created")], 1, &midnight);
        assert_eq!(timeline.len(), 1);
        assert_eq!(timeline[0].counts.ticket_created, 1);
    }

    #[test]
    fn zero_range_behaves_like_one_day() {
        let timeline = normalize_at(&[], 0, &now());
        assert_eq!(timeline.len(), normalize_at(&[], 1, &now()).len());
    }

    #[test]
    fn oversized_range_is_clamped() {
        let timeline = normalize_at(&[], u32::MAX, &now());
        assert_eq!(timeline.len(), MAX_DAYS as usize);
        assert_eq!(timeline.last().unwrap().date, "2026-01-05");
        assert_eq!(timeline.first().unwrap().date, "2025-01-06");
    }

    #[test]
    fn days_are_keyed_in_the_callers_time_zone() {
        let tz = FixedOffset::east_opt(2 * 3600).unwrap();
        let local_now = now().with_timezone(&tz);
        // 23:30 UTC on the 3rd is 01:30 on the 4th at +02:00.
        let late = Utc.with_ymd_and_hms(2026, 1, 3, 23, 30, 0).unwrap();

        let timeline = normalize_at(&[event(late, "wipe_created")], 3, &local_now);
        let hit: Vec<_> = timeline
            .iter()
            .filter(|bucket| bucket.counts.wipe_created == 1)
            .map(|bucket| bucket.date.as_str())
            .collect();
        assert_eq!(hit, vec!["2026-01-04"]);
    }
}
