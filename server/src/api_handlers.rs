use std::collections::BTreeMap;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use common::{ErrorCode, MatchSnapshot, PlayerStats, Username, log_debug};

use crate::errors::MatchError;
use crate::session_registry::{MatchRequestOutcome, RegistryStats, StateQuery};
use crate::web_server::WebServerState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub stats: RegistryStats,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: ErrorCode,
    message: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QueueResponse {
    Queued,
    Paired { snapshot: MatchSnapshot },
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum GameStateResponse {
    InProgress { snapshot: MatchSnapshot },
    Concluded { snapshot: MatchSnapshot },
    Cleared,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    pub row: usize,
    pub col: usize,
}

impl MatchError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MatchError::AlreadyExists | MatchError::AlreadyQueued | MatchError::AlreadyInSession => StatusCode::CONFLICT,
            MatchError::Unregistered | MatchError::NoActiveSession => StatusCode::NOT_FOUND,
            MatchError::InvalidMove(_) | MatchError::NotAParticipant => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            code: self.code(),
            message: self.to_string(),
        };
        (self.status_code(), Json(body)).into_response()
    }
}

pub async fn health(State(state): State<WebServerState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "UP",
        message: "1v1 backend is running",
        stats: state.registry.stats().await,
    })
}

pub async fn register(
    State(state): State<WebServerState>,
    Path(username): Path<String>,
) -> Response {
    if let Some(reason) = state.policy.validate(&username) {
        log_debug!("Registration of {:?} refused: {}", username, reason);
        return (StatusCode::BAD_REQUEST, reason).into_response();
    }

    match state.registry.register(&Username::new(username)).await {
        Ok(()) => StatusCode::ACCEPTED.into_response(),
        Err(err) => err.into_response(),
    }
}

pub async fn unregister(
    State(state): State<WebServerState>,
    Path(username): Path<String>,
) -> Result<StatusCode, MatchError> {
    state.registry.unregister(&Username::new(username)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn queue_up(
    State(state): State<WebServerState>,
    Path(username): Path<String>,
) -> Result<Json<QueueResponse>, MatchError> {
    let outcome = state.registry.request_match(&Username::new(username)).await?;
    Ok(Json(match outcome {
        MatchRequestOutcome::Queued => QueueResponse::Queued,
        MatchRequestOutcome::Paired(snapshot) => QueueResponse::Paired { snapshot },
    }))
}

pub async fn make_move(
    State(state): State<WebServerState>,
    Path(username): Path<String>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<MatchSnapshot>, MatchError> {
    let snapshot = state
        .registry
        .submit_move(&Username::new(username), request.row, request.col)
        .await?;
    Ok(Json(snapshot))
}

pub async fn game_state(
    State(state): State<WebServerState>,
    Path(username): Path<String>,
) -> Result<Json<GameStateResponse>, MatchError> {
    let query = state.registry.query_state(&Username::new(username)).await?;
    Ok(Json(match query {
        StateQuery::InProgress(snapshot) => GameStateResponse::InProgress { snapshot },
        StateQuery::Concluded(snapshot) => GameStateResponse::Concluded { snapshot },
        StateQuery::Cleared => GameStateResponse::Cleared,
    }))
}

pub async fn list_users(State(state): State<WebServerState>) -> Json<BTreeMap<Username, PlayerStats>> {
    Json(state.registry.list_users().await)
}
