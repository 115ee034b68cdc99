use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use shared::models::catalog::Game;
use shared::models::position::{Position, PositionId};
use shared::services::errors::catalog_service_errors::CatalogServiceError;
use shared::services::position_service::PrefetchReport;
use tracing::{debug, error};

use super::parse_game_type;
use crate::{error::ApiError, models::RefreshQuery, state::AppState};

const POSITION_PATH: &str =
    "/game-types/{game_type}/games/{game_id}/variants/{variant_id}/positions/{position}";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/game-types/{game_type}/games", get(list_games))
        .route(
            "/game-types/{game_type}/games/{game_id}/variants",
            get(get_variants),
        )
        .route(POSITION_PATH, get(get_position))
        .route(&format!("{}/prefetch", POSITION_PATH), post(prefetch))
}

async fn list_games(
    State(state): State<AppState>,
    Path(game_type): Path<String>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Vec<Game>>, ApiError> {
    let game_type = parse_game_type(&game_type)?;
    let mut service = state.match_service.lock().await;
    let catalog = service.catalog_mut();

    catalog
        .load_games(game_type, query.force)
        .await
        .map_err(|e| {
            error!("Failed to load games for {}: {}", game_type, e);
            ApiError::from(e)
        })?;

    let mut games: Vec<Game> = catalog
        .game_type(game_type)
        .map(|partition| partition.games.values().cloned().collect())
        .unwrap_or_default();
    games.sort_by(|a, b| a.name.cmp(&b.name));
    debug!("Listing {} games for {}", games.len(), game_type);
    Ok(Json(games))
}

async fn get_variants(
    State(state): State<AppState>,
    Path((game_type, game_id)): Path<(String, String)>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Game>, ApiError> {
    let game_type = parse_game_type(&game_type)?;
    let mut service = state.match_service.lock().await;
    let catalog = service.catalog_mut();

    catalog
        .load_variants(game_type, &game_id, query.force)
        .await
        .map_err(|e| {
            error!("Failed to load variants for {}: {}", game_id, e);
            ApiError::from(e)
        })?;

    catalog
        .game(game_type, &game_id)
        .cloned()
        .map(Json)
        .ok_or_else(|| CatalogServiceError::UnknownGame(game_id).into())
}

async fn get_position(
    State(state): State<AppState>,
    Path((game_type, game_id, variant_id, position)): Path<(String, String, String, String)>,
    Query(query): Query<RefreshQuery>,
) -> Result<Json<Position>, ApiError> {
    let id = PositionId::new(parse_game_type(&game_type)?, &game_id, &variant_id, &position);
    let mut service = state.match_service.lock().await;

    service
        .positions_mut()
        .load_position(&id, query.force)
        .await
        .map(|position| Json(position.clone()))
        .map_err(|e| {
            error!("Failed to load position {}: {}", id.position, e);
            ApiError::from(e)
        })
}

async fn prefetch(
    State(state): State<AppState>,
    Path((game_type, game_id, variant_id, position)): Path<(String, String, String, String)>,
) -> Result<Json<PrefetchReport>, ApiError> {
    let id = PositionId::new(parse_game_type(&game_type)?, &game_id, &variant_id, &position);
    let mut service = state.match_service.lock().await;
    let positions = service.positions_mut();

    positions.load_position(&id, false).await?;
    let report = positions.pre_fetch_next_positions(&id).await?;
    Ok(Json(report))
}
