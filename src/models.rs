use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Habit {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One completion fact. At most one per `(habit_id, date)`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CompletionLog {
    pub habit_id: u64,
    pub date: NaiveDate,
    #[serde(default = "default_completed")]
    pub completed: bool,
    pub recorded_at: DateTime<Utc>,
}

fn default_completed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AppData {
    #[serde(default)]
    pub next_habit_id: u64,
    #[serde(default)]
    pub habits: Vec<Habit>,
    #[serde(default)]
    pub logs: Vec<CompletionLog>,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHabitResponse {
    pub message: String,
    pub habit_id: u64,
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HabitSummary {
    pub id: u64,
    pub owner_id: u64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub total_completed: u64,
    pub last_completed: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MarkDoneResponse {
    pub message: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct StreakSummary {
    pub current_streak: u64,
    pub longest_streak: u64,
    pub total_completed: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub date: NaiveDate,
    pub completed: bool,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub days: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub habit_name: String,
    pub history: Vec<HistoryEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct StatsResponse {
    pub total_habits: u64,
    pub completed_today: u64,
    pub remaining_today: u64,
    pub total_completions: u64,
    pub completion_rate_today: f64,
}
