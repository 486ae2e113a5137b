use crate::errors::AppError;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::history::{build_history, window_start, DEFAULT_HISTORY_DAYS, MAX_HISTORY_DAYS};
use crate::models::{
    CreateHabitRequest, CreateHabitResponse, HabitSummary, HistoryQuery, HistoryResponse,
    MarkDoneResponse, MessageResponse, StatsResponse, StreakSummary,
};
use crate::owner::Owner;
use crate::state::AppState;
use crate::stats::build_stats;
use crate::storage::MarkOutcome;
use crate::streak::compute_streak;
use axum::{extract::State, http::StatusCode, Json};
use tracing::info;

const MIN_NAME_CHARS: usize = 2;

pub async fn create_habit(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    AppJson(payload): AppJson<CreateHabitRequest>,
) -> Result<(StatusCode, Json<CreateHabitResponse>), AppError> {
    let name = validate_name(&payload.name)?;
    let now = state.clock.now();

    let habit = state
        .write(|data| data.insert_habit(owner_id, name, now))
        .await?;
    info!(habit_id = habit.id, owner_id, "habit created");

    Ok((
        StatusCode::CREATED,
        Json(CreateHabitResponse {
            message: "Habit added successfully!".to_string(),
            habit_id: habit.id,
            name: habit.name,
        }),
    ))
}

pub async fn list_habits(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
) -> Result<Json<Vec<HabitSummary>>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(data.habit_summaries(owner_id)))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    AppPath(habit_id): AppPath<u64>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .write(|data| {
            if data.delete_habit(owner_id, habit_id) {
                Ok(())
            } else {
                Err(habit_not_found())
            }
        })
        .await?;
    info!(habit_id, owner_id, "habit deleted");

    Ok(Json(MessageResponse {
        message: "Habit deleted successfully".to_string(),
    }))
}

pub async fn mark_done(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    AppPath(habit_id): AppPath<u64>,
) -> Result<(StatusCode, Json<MarkDoneResponse>), AppError> {
    let today = state.clock.today();
    let now = state.clock.now();

    let outcome = state
        .write(|data| {
            if data.habit(owner_id, habit_id).is_none() {
                return Err(habit_not_found());
            }
            Ok(data.mark_done(habit_id, today, now))
        })
        .await?;

    let (status, message) = match outcome {
        MarkOutcome::Marked => {
            info!(habit_id, owner_id, %today, "habit marked done");
            (StatusCode::CREATED, "Habit marked as done for today!")
        }
        MarkOutcome::AlreadyDone => (StatusCode::OK, "Already marked as done today!"),
    };

    Ok((
        status,
        Json(MarkDoneResponse {
            message: message.to_string(),
            date: today,
        }),
    ))
}

pub async fn get_streak(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    AppPath(habit_id): AppPath<u64>,
) -> Result<Json<StreakSummary>, AppError> {
    let data = state.data.lock().await;
    if data.habit(owner_id, habit_id).is_none() {
        return Err(habit_not_found());
    }
    let dates = data.completion_dates(habit_id);

    Ok(Json(compute_streak(&dates, state.clock.today())))
}

pub async fn get_history(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
    AppPath(habit_id): AppPath<u64>,
    AppQuery(query): AppQuery<HistoryQuery>,
) -> Result<Json<HistoryResponse>, AppError> {
    let days = validate_days(query.days)?;
    let today = state.clock.today();

    let data = state.data.lock().await;
    let habit = data
        .habit(owner_id, habit_id)
        .ok_or_else(habit_not_found)?;
    let dates = data.completion_dates_since(habit_id, window_start(days, today));

    Ok(Json(HistoryResponse {
        habit_name: habit.name.clone(),
        history: build_history(&dates, days, today),
    }))
}

pub async fn get_stats(
    State(state): State<AppState>,
    Owner(owner_id): Owner,
) -> Result<Json<StatsResponse>, AppError> {
    let data = state.data.lock().await;
    Ok(Json(build_stats(&data, owner_id, state.clock.today())))
}

fn validate_name(raw: &str) -> Result<&str, AppError> {
    let name = raw.trim();
    if name.chars().count() < MIN_NAME_CHARS {
        return Err(AppError::bad_request(
            "Habit name must be at least 2 characters",
        ));
    }
    Ok(name)
}

fn validate_days(days: Option<i64>) -> Result<u32, AppError> {
    let days = days.unwrap_or(i64::from(DEFAULT_HISTORY_DAYS));
    if days < 1 || days > i64::from(MAX_HISTORY_DAYS) {
        return Err(AppError::bad_request(format!(
            "days must be between 1 and {MAX_HISTORY_DAYS}"
        )));
    }
    Ok(days as u32)
}

fn habit_not_found() -> AppError {
    AppError::not_found("Habit not found")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_trimmed_and_counted_in_chars() {
        assert_eq!(validate_name("  Read  ").unwrap(), "Read");
        assert_eq!(validate_name("瞑想").unwrap(), "瞑想");
        assert!(validate_name(" a ").is_err());
        assert!(validate_name("").is_err());
    }

    #[test]
    fn days_default_and_bounds() {
        assert_eq!(validate_days(None).unwrap(), 30);
        assert_eq!(validate_days(Some(1)).unwrap(), 1);
        assert!(validate_days(Some(0)).is_err());
        assert!(validate_days(Some(-3)).is_err());
        assert!(validate_days(Some(100_000)).is_err());
    }
}
