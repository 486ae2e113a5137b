use crate::models::{AppData, CompletionLog, StatsResponse};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Percentage of habits completed today, rounded half up to one decimal
/// place. Zero when there are no habits.
pub fn completion_rate(completed_today: u64, total_habits: u64) -> f64 {
    if total_habits == 0 {
        return 0.0;
    }
    // Integer tenths of a percent so exact ties never drift below .5.
    let completed = u128::from(completed_today);
    let total = u128::from(total_habits);
    let tenths = (2000 * completed + total) / (2 * total);
    tenths as f64 / 10.0
}

pub fn build_stats(data: &AppData, owner_id: u64, today: NaiveDate) -> StatsResponse {
    let owned: HashSet<u64> = data
        .habits
        .iter()
        .filter(|habit| habit.owner_id == owner_id)
        .map(|habit| habit.id)
        .collect();

    let owned_logs: Vec<&CompletionLog> = data
        .logs
        .iter()
        .filter(|log| log.completed && owned.contains(&log.habit_id))
        .collect();

    let completed_today = owned_logs
        .iter()
        .filter(|log| log.date == today)
        .map(|log| log.habit_id)
        .collect::<HashSet<_>>()
        .len() as u64;
    let total_habits = owned.len() as u64;

    StatsResponse {
        total_habits,
        completed_today,
        remaining_today: total_habits.saturating_sub(completed_today),
        total_completions: owned_logs.len() as u64,
        completion_rate_today: completion_rate(completed_today, total_habits),
    }
}
