use crate::models::{ChangelogData, ChangelogEntry};
use chrono::{DateTime, TimeZone, Utc};

pub const GRID_ROWS: usize = 3;
pub const GRID_COLUMNS: usize = 40;
pub const GRID_SLOTS: usize = GRID_ROWS * GRID_COLUMNS;

/// Lays entries out over the fixed grid; unused slots are `None` and entries
/// past the last slot are not shown.
pub fn grid(data: &ChangelogData) -> Vec<Option<ChangelogEntry>> {
    (0..GRID_SLOTS).map(|index| data.entries.get(index).cloned()).collect()
}

/// Bumps the view counter of the entry at `index`, returning the new count.
pub fn record_view(data: &mut ChangelogData, index: usize) -> Option<u64> {
    let entry = data.entries.get_mut(index)?;
    entry.views = entry.views.saturating_add(1);
    Some(entry.views)
}

pub fn seed(now: DateTime<Utc>) -> ChangelogData {
    let at = |y, m, d, h| Utc.with_ymd_and_hms(y, m, d, h, 0, 0).single().unwrap_or(now);
    ChangelogData {
        entries: vec![
            ChangelogEntry {
                date: now,
                views: 0,
                added: lines(&[
                    "Changelog grid with per-entry view counters.",
                    "Color pipette with HEX, CMYK, HSV and HSL readouts.",
                ]),
                fixed: Vec::new(),
                changed: Vec::new(),
            },
            ChangelogEntry {
                date: at(2025, 1, 15, 10),
                views: 0,
                added: lines(&["Map hosting: upload, download and delete .map files."]),
                fixed: lines(&["Analytics chart no longer skips days without events."]),
                changed: Vec::new(),
            },
            ChangelogEntry {
                date: at(2025, 1, 13, 15),
                views: 0,
                added: lines(&["Analytics dashboard with 1, 7 and 30 day ranges."]),
                fixed: Vec::new(),
                changed: lines(&["Auto-delete channels show the time left before removal."]),
            },
        ],
    }
}

fn lines(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| (*item).to_string()).collect()
}
