use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use shared::models::game_match::{Match, MatchConfig};
use shared::services::errors::match_service_errors::MatchServiceError;
use tracing::{error, info};

use crate::{
    error::ApiError,
    models::{HistoryResponse, MoveRequest},
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/matches", post(initiate_match))
        .route("/matches/current", get(current_match))
        .route("/matches/current/history", get(history))
        .route("/matches/current/moves", post(run_move))
        .route("/matches/current/undo", post(undo_move))
        .route("/matches/current/redo", post(redo_move))
        .route("/matches/current/exit", post(exit_match))
        .route("/matches/current/restart", post(restart_match))
}

async fn initiate_match(
    State(state): State<AppState>,
    Json(config): Json<MatchConfig>,
) -> Result<(StatusCode, Json<Match>), ApiError> {
    let mut service = state.match_service.lock().await;
    let game_match = service.initiate_match(config).await.map_err(|e| {
        error!("Failed to initiate match: {}", e);
        ApiError::from(e)
    })?;
    info!("Match {} started", game_match.id);
    Ok((StatusCode::CREATED, Json(game_match.clone())))
}

async fn current_match(State(state): State<AppState>) -> Result<Json<Match>, ApiError> {
    let service = state.match_service.lock().await;
    service
        .current_match()
        .cloned()
        .map(Json)
        .ok_or(ApiError::MatchService(MatchServiceError::NoActiveMatch))
}

async fn history(State(state): State<AppState>) -> Result<Json<HistoryResponse>, ApiError> {
    let service = state.match_service.lock().await;
    let rounds = service.history()?.to_vec();
    let current_round_id = rounds.last().map(|round| round.id).unwrap_or(1);

    Ok(Json(HistoryResponse {
        is_end_of_match: service.is_end_of_match()?,
        maximum_remoteness: service.maximum_remoteness(1, current_round_id)?,
        rounds,
    }))
}

async fn run_move(
    State(state): State<AppState>,
    Json(request): Json<MoveRequest>,
) -> Result<Json<Match>, ApiError> {
    let mut service = state.match_service.lock().await;
    service
        .run_move(&request.move_label)
        .await
        .map(|game_match| Json(game_match.clone()))
        .map_err(|e| {
            error!("Move {} failed: {}", request.move_label, e);
            ApiError::from(e)
        })
}

async fn undo_move(State(state): State<AppState>) -> Result<Json<Match>, ApiError> {
    let mut service = state.match_service.lock().await;
    let game_match = service.undo_move()?;
    Ok(Json(game_match.clone()))
}

async fn redo_move(State(state): State<AppState>) -> Result<Json<Match>, ApiError> {
    let mut service = state.match_service.lock().await;
    let game_match = service.redo_move()?;
    Ok(Json(game_match.clone()))
}

/// Responds with the archived match, or `204` when the match had no moves
/// and was discarded.
async fn exit_match(
    State(state): State<AppState>,
) -> Result<Result<Json<Match>, StatusCode>, ApiError> {
    let mut service = state.match_service.lock().await;
    let archived = service.exit_match().await.map_err(|e| {
        error!("Failed to exit match: {}", e);
        ApiError::from(e)
    })?;
    Ok(archived.map(Json).ok_or(StatusCode::NO_CONTENT))
}

async fn restart_match(State(state): State<AppState>) -> Result<Json<Match>, ApiError> {
    let mut service = state.match_service.lock().await;
    let game_match = service.restart_match().await.map_err(|e| {
        error!("Failed to restart match: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(game_match.clone()))
}
