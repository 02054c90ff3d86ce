use crate::errors::{AppError, ViewError};
use crate::models::{MessageResponse, MonthQuery, NavigationResponse, SelectRequest};
use crate::state::AppState;
use crate::ui::render_index;
use crate::view::{PageSnapshot, ViewPhase};
use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form, Json,
};
use tracing::warn;

/// The first page view is the page activation that triggers a load.
pub async fn index(State(state): State<AppState>) -> Html<String> {
    let controller = &state.controller;
    if controller.phase().await == ViewPhase::Pending {
        log_refusal("load", controller.load().await);
    }
    Html(render_index(&controller.take_page().await))
}

pub async fn load(State(state): State<AppState>) -> Redirect {
    log_refusal("load", state.controller.load().await);
    Redirect::to("/")
}

pub async fn select(State(state): State<AppState>, Form(form): Form<SelectRequest>) -> Redirect {
    log_refusal("select", state.controller.select(&form.id, form.status).await);
    Redirect::to("/")
}

pub async fn save(State(state): State<AppState>) -> Redirect {
    log_refusal("save", state.controller.save().await);
    Redirect::to("/")
}

pub async fn refresh_reports(State(state): State<AppState>) -> Redirect {
    log_refusal("refresh_reports", state.controller.refresh_reports().await);
    Redirect::to("/")
}

pub async fn export_daily(State(state): State<AppState>) -> Redirect {
    navigate_or_home("export_daily", state.controller.export_daily().await)
}

pub async fn export_monthly(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Redirect {
    navigate_or_home(
        "export_monthly",
        state.controller.export_monthly(query.month.as_deref()).await,
    )
}

pub async fn get_view(State(state): State<AppState>) -> Json<PageSnapshot> {
    Json(state.controller.snapshot().await)
}

pub async fn api_load(State(state): State<AppState>) -> Result<Json<PageSnapshot>, AppError> {
    state.controller.load().await?;
    Ok(Json(state.controller.snapshot().await))
}

pub async fn api_select(
    State(state): State<AppState>,
    Json(payload): Json<SelectRequest>,
) -> Result<Json<PageSnapshot>, AppError> {
    state.controller.select(&payload.id, payload.status).await?;
    Ok(Json(state.controller.snapshot().await))
}

pub async fn api_save(State(state): State<AppState>) -> Result<Json<MessageResponse>, AppError> {
    let msg = state.controller.save().await?;
    Ok(Json(MessageResponse { msg }))
}

pub async fn api_export_daily(
    State(state): State<AppState>,
) -> Result<Json<NavigationResponse>, AppError> {
    let url = state.controller.export_daily().await?;
    Ok(Json(NavigationResponse { url: url.into() }))
}

pub async fn api_export_monthly(
    State(state): State<AppState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<NavigationResponse>, AppError> {
    let url = state.controller.export_monthly(query.month.as_deref()).await?;
    Ok(Json(NavigationResponse { url: url.into() }))
}

fn navigate_or_home(action: &'static str, result: Result<reqwest::Url, ViewError>) -> Redirect {
    match result {
        Ok(url) => Redirect::to(url.as_str()),
        Err(err) => {
            warn!(action, error = %err, "navigation refused");
            Redirect::to("/")
        }
    }
}

fn log_refusal<T>(action: &'static str, result: Result<T, ViewError>) {
    if let Err(err) = result {
        warn!(action, error = %err, "request refused");
    }
}
