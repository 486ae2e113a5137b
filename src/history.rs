use crate::models::HistoryEntry;
use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

pub const DEFAULT_HISTORY_DAYS: u32 = 30;
pub const MAX_HISTORY_DAYS: u32 = 3660;

/// First date covered by a `days`-long window ending at `today`.
pub fn window_start(days: u32, today: NaiveDate) -> NaiveDate {
    today - Duration::days(i64::from(days.max(1)) - 1)
}

/// Fixed-length calendar view ending at `today`, most recent first. Days with
/// no completion are reported as not completed.
pub fn build_history(dates: &[NaiveDate], days: u32, today: NaiveDate) -> Vec<HistoryEntry> {
    let done: HashSet<NaiveDate> = dates.iter().copied().collect();

    (0..i64::from(days))
        .map(|offset| {
            let date = today - Duration::days(offset);
            HistoryEntry {
                date,
                completed: done.contains(&date),
            }
        })
        .collect()
}
