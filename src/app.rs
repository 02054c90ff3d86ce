use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/load", post(handlers::load))
        .route("/select", post(handlers::select))
        .route("/save", post(handlers::save))
        .route("/reports/refresh", post(handlers::refresh_reports))
        .route("/export/daily", get(handlers::export_daily))
        .route("/export/monthly", get(handlers::export_monthly))
        .route("/api/view", get(handlers::get_view))
        .route("/api/load", post(handlers::api_load))
        .route("/api/select", post(handlers::api_select))
        .route("/api/save", post(handlers::api_save))
        .route("/api/export/daily", get(handlers::api_export_daily))
        .route("/api/export/monthly", get(handlers::api_export_monthly))
        .with_state(state)
}
