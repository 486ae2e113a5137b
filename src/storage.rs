use crate::errors::{AppError, StoreError};
use crate::models::{AppData, CompletionLog, Habit, HabitSummary};
use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkOutcome {
    Marked,
    AlreadyDone,
}

/// Reads the store at `path`. A missing file is an empty store; an unreadable
/// or unparsable one is an error so it never gets overwritten.
pub async fn load_data(path: &Path) -> Result<AppData, StoreError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no store file yet, starting empty");
            return Ok(AppData::default());
        }
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let data: AppData = serde_json::from_slice(&bytes).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let orphans = data
        .logs
        .iter()
        .filter(|log| !data.habits.iter().any(|habit| habit.id == log.habit_id))
        .count();
    if orphans > 0 {
        warn!(orphans, "store has log rows without a habit");
    }
    Ok(data)
}

/// Writes next to `path` and renames over it so a crash mid-write never
/// leaves a truncated store behind.
pub async fn persist_data(path: &Path, data: &AppData) -> Result<(), StoreError> {
    let payload = serde_json::to_vec_pretty(data)?;
    let tmp = path.with_extension("json.tmp");
    let write_err = |source| StoreError::Write {
        path: path.to_path_buf(),
        source,
    };
    fs::write(&tmp, payload).await.map_err(write_err)?;
    fs::rename(&tmp, path).await.map_err(write_err)?;
    Ok(())
}

impl AppData {
    /// Rejects a name that matches an existing habit of the same owner,
    /// ignoring case.
    pub fn insert_habit(
        &mut self,
        owner_id: u64,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Habit, AppError> {
        let lowered = name.to_lowercase();
        let duplicate = self
            .habits
            .iter()
            .any(|habit| habit.owner_id == owner_id && habit.name.to_lowercase() == lowered);
        if duplicate {
            return Err(AppError::conflict("Habit already exists"));
        }

        let highest = self.habits.iter().map(|habit| habit.id).max().unwrap_or(0);
        let id = self.next_habit_id.max(highest) + 1;
        self.next_habit_id = id;

        let habit = Habit {
            id,
            owner_id,
            name: name.to_string(),
            created_at: now,
        };
        self.habits.push(habit.clone());
        Ok(habit)
    }

    pub fn habit(&self, owner_id: u64, habit_id: u64) -> Option<&Habit> {
        self.habits
            .iter()
            .find(|habit| habit.id == habit_id && habit.owner_id == owner_id)
    }

    /// Newest habits first.
    pub fn habit_summaries(&self, owner_id: u64) -> Vec<HabitSummary> {
        let mut habits: Vec<&Habit> = self
            .habits
            .iter()
            .filter(|habit| habit.owner_id == owner_id)
            .collect();
        habits.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        habits
            .into_iter()
            .map(|habit| {
                let dates = self.completion_dates(habit.id);
                HabitSummary {
                    id: habit.id,
                    owner_id: habit.owner_id,
                    name: habit.name.clone(),
                    created_at: habit.created_at,
                    total_completed: dates.len() as u64,
                    last_completed: dates.iter().max().copied(),
                }
            })
            .collect()
    }

    /// Removes the habit and every log row that belongs to it. Returns false
    /// when the owner has no such habit.
    pub fn delete_habit(&mut self, owner_id: u64, habit_id: u64) -> bool {
        if self.habit(owner_id, habit_id).is_none() {
            return false;
        }
        self.habits.retain(|habit| habit.id != habit_id);
        self.logs.retain(|log| log.habit_id != habit_id);
        true
    }

    pub fn mark_done(&mut self, habit_id: u64, date: NaiveDate, now: DateTime<Utc>) -> MarkOutcome {
        let exists = self
            .logs
            .iter()
            .any(|log| log.habit_id == habit_id && log.date == date);
        if exists {
            return MarkOutcome::AlreadyDone;
        }

        self.logs.push(CompletionLog {
            habit_id,
            date,
            completed: true,
            recorded_at: now,
        });
        MarkOutcome::Marked
    }

    /// Completion dates in storage order; callers must not assume sorting.
    pub fn completion_dates(&self, habit_id: u64) -> Vec<NaiveDate> {
        self.logs
            .iter()
            .filter(|log| log.habit_id == habit_id && log.completed)
            .map(|log| log.date)
            .collect()
    }

    pub fn completion_dates_since(&self, habit_id: u64, start: NaiveDate) -> Vec<NaiveDate> {
        self.completion_dates(habit_id)
            .into_iter()
            .filter(|date| *date >= start)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).unwrap()
    }

    #[test]
    fn duplicate_names_are_rejected_per_owner() {
        let mut data = AppData::default();
        let first = data.insert_habit(1, "Read", Utc::now()).unwrap();
        assert_eq!(first.id, 1);

        let err = data.insert_habit(1, "READ", Utc::now()).unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::CONFLICT);

        let other = data.insert_habit(2, "read", Utc::now()).unwrap();
        assert_eq!(other.id, 2);
        assert_eq!(data.habits.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_delete() {
        let mut data = AppData::default();
        let first = data.insert_habit(1, "Walk", Utc::now()).unwrap();
        assert!(data.delete_habit(1, first.id));
        let second = data.insert_habit(1, "Walk", Utc::now()).unwrap();
        assert_eq!(second.id, first.id + 1);
    }

    #[test]
    fn marking_twice_keeps_one_row() {
        let mut data = AppData::default();
        let habit = data.insert_habit(1, "Stretch", Utc::now()).unwrap();

        assert_eq!(data.mark_done(habit.id, today(), Utc::now()), MarkOutcome::Marked);
        assert_eq!(
            data.mark_done(habit.id, today(), Utc::now()),
            MarkOutcome::AlreadyDone
        );
        assert_eq!(data.logs.len(), 1);
    }

    #[test]
    fn delete_cascades_to_logs_and_checks_owner() {
        let mut data = AppData::default();
        let keep = data.insert_habit(1, "Keep", Utc::now()).unwrap();
        let gone = data.insert_habit(1, "Drop", Utc::now()).unwrap();
        data.mark_done(keep.id, today(), Utc::now());
        data.mark_done(gone.id, today(), Utc::now());
        data.mark_done(gone.id, today() - Duration::days(1), Utc::now());

        assert!(!data.delete_habit(2, gone.id));
        assert!(data.delete_habit(1, gone.id));
        assert!(!data.delete_habit(1, gone.id));
        assert_eq!(data.logs.len(), 1);
        assert_eq!(data.logs[0].habit_id, keep.id);
    }

    #[test]
    fn summaries_are_newest_first_with_totals() {
        let mut data = AppData::default();
        let now = Utc::now();
        let older = data.insert_habit(1, "Older", now - Duration::hours(1)).unwrap();
        let newer = data.insert_habit(1, "Newer", now).unwrap();
        data.insert_habit(2, "Elsewhere", now).unwrap();
        data.mark_done(older.id, today() - Duration::days(3), now);
        data.mark_done(older.id, today(), now);

        let summaries = data.habit_summaries(1);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, newer.id);
        assert_eq!(summaries[0].total_completed, 0);
        assert_eq!(summaries[0].last_completed, None);
        assert_eq!(summaries[1].total_completed, 2);
        assert_eq!(summaries[1].last_completed, Some(today()));
    }

    #[test]
    fn range_read_starts_at_window() {
        let mut data = AppData::default();
        let habit = data.insert_habit(1, "Run", Utc::now()).unwrap();
        for offset in [0, 2, 9] {
            data.mark_done(habit.id, today() - Duration::days(offset), Utc::now());
        }
        let mut dates = data.completion_dates_since(habit.id, today() - Duration::days(6));
        dates.sort();
        assert_eq!(dates, vec![today() - Duration::days(2), today()]);
    }

    #[tokio::test]
    async fn persisted_data_loads_back() {
        let mut path = std::env::temp_dir();
        path.push(format!("habit_tracker_storage_{}.json", std::process::id()));

        let mut data = AppData::default();
        let habit = data.insert_habit(7, "Journal", Utc::now()).unwrap();
        data.mark_done(habit.id, today(), Utc::now());
        persist_data(&path, &data).await.unwrap();

        let loaded = load_data(&path).await.unwrap();
        assert_eq!(loaded.habits, data.habits);
        assert_eq!(loaded.logs, data.logs);
        assert_eq!(loaded.next_habit_id, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let path = std::env::temp_dir().join("habit_tracker_does_not_exist.json");
        let loaded = load_data(&path).await.unwrap();
        assert!(loaded.habits.is_empty());
        assert!(loaded.logs.is_empty());
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error_and_left_alone() {
        let mut path = std::env::temp_dir();
        path.push(format!("habit_tracker_corrupt_{}.json", std::process::id()));
        let truncated = br#"{"next_habit_id": 3, "habits": [{"id": 1, "owner_"#;
        std::fs::write(&path, truncated).unwrap();

        let err = load_data(&path).await.unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert_eq!(std::fs::read(&path).unwrap(), truncated.to_vec());

        let _ = std::fs::remove_file(&path);
    }

    #[tokio::test]
    async fn unreadable_path_is_an_error() {
        let dir = std::env::temp_dir();
        let err = load_data(&dir).await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
