use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route(
            "/api/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route("/api/weather", get(handlers::get_weather))
        .route("/api/stats/distribution", get(handlers::get_distribution))
        .route("/api/stats/trend", get(handlers::get_trend))
        .route("/api/calendar", get(handlers::get_calendar))
        .route("/api/export", get(handlers::export_csv))
        .with_state(state)
}
