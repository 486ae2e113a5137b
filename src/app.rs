use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/habits", post(handlers::create_habit).get(handlers::list_habits))
        .route("/habits/:id", delete(handlers::delete_habit))
        .route("/habits/:id/done", post(handlers::mark_done))
        .route("/habits/:id/streak", get(handlers::get_streak))
        .route("/habits/:id/history", get(handlers::get_history))
        .route("/stats", get(handlers::get_stats))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
