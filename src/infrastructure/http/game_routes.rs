//! Game session routes

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::application::dto::{
    AdjustAttributeRequest, ConfirmAllocationRequest, Screen, SelectClassRequest,
    SelectPathRequest, SubmissionResult, SubmitCodeRequest,
};
use crate::application::services::SessionError;
use crate::domain::aggregates::ProgressionError;
use crate::domain::entities::CompletedQuest;
use crate::infrastructure::state::AppState;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorBody>);

fn api_error(e: SessionError) -> ApiError {
    let status = match &e {
        SessionError::Progression(ProgressionError::Allocation(_)) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        SessionError::Progression(_) | SessionError::Busy | SessionError::StaleResult => {
            StatusCode::CONFLICT
        }
        SessionError::EvaluationTask(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (
        status,
        Json(ErrorBody {
            error: e.to_string(),
        }),
    )
}

/// Current screen; requests a lesson when the learning screen has none
pub async fn get_screen(State(state): State<Arc<AppState>>) -> Json<Screen> {
    Json(state.game.render().await)
}

pub async fn select_class(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectClassRequest>,
) -> Result<Json<Screen>, ApiError> {
    state
        .game
        .select_class(req.class_id)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn select_path(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SelectPathRequest>,
) -> Result<Json<Screen>, ApiError> {
    state
        .game
        .select_path(req.path_id)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn submit_code(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitCodeRequest>,
) -> Result<Json<SubmissionResult>, ApiError> {
    state
        .game
        .submit_code(req.code)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn next_quest(State(state): State<Arc<AppState>>) -> Result<Json<Screen>, ApiError> {
    state.game.next_quest().await.map(Json).map_err(api_error)
}

pub async fn adjust_attribute(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AdjustAttributeRequest>,
) -> Result<Json<Screen>, ApiError> {
    state
        .game
        .adjust_attribute(req.attribute, req.adjustment)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn confirm_allocation(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ConfirmAllocationRequest>,
) -> Result<Json<Screen>, ApiError> {
    state
        .game
        .confirm_allocation(req.stats)
        .await
        .map(Json)
        .map_err(api_error)
}

pub async fn quest_log(State(state): State<Arc<AppState>>) -> Json<Vec<CompletedQuest>> {
    Json(state.game.quest_log().await)
}
