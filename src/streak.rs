use crate::models::StreakSummary;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Current streak, longest streak and total count for a habit's completion
/// dates. Input may be unordered and sparse; duplicates count once.
pub fn compute_streak(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let set: BTreeSet<NaiveDate> = dates.iter().copied().collect();
    if set.is_empty() {
        return StreakSummary::default();
    }

    StreakSummary {
        current_streak: current_streak(&set, today),
        longest_streak: longest_streak(&set),
        total_completed: set.len() as u64,
    }
}

fn current_streak(set: &BTreeSet<NaiveDate>, today: NaiveDate) -> u64 {
    let mut streak = 0u64;
    let mut day = today;
    while set.contains(&day) {
        streak += 1;
        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }
    streak
}

// BTreeSet iterates ascending, so adjacency is a one-day difference.
fn longest_streak(set: &BTreeSet<NaiveDate>) -> u64 {
    let mut longest = 0u64;
    let mut run = 0u64;
    let mut previous: Option<NaiveDate> = None;

    for &date in set {
        run = match previous {
            Some(prev) if (date - prev).num_days() == 1 => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        previous = Some(date);
    }

    longest
}
