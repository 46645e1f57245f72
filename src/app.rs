use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/observations",
            get(handlers::list_observations).post(handlers::record_observation),
        )
        .route("/api/predictions/today", get(handlers::predict_today))
        .route("/api/predictions/week", get(handlers::predict_next_week))
        .route("/api/predictions/remaining", get(handlers::predict_remaining))
        .route("/api/predictions/:date", get(handlers::predict_date))
        .route("/api/peak-hours", get(handlers::peak_hours))
        .with_state(state)
}
