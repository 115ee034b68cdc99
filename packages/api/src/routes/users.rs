use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use shared::models::user::User;
use tracing::error;

use crate::{error::ApiError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/{user_id}/matches", get(get_user_matches))
}

async fn get_user_matches(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, ApiError> {
    // Clone the archive handle so the lookup runs without holding the match lock.
    let archive = state.match_service.lock().await.archive().clone();

    archive.user(&user_id).await.map(Json).map_err(|e| {
        error!("Failed to retrieve archive of {}: {}", user_id, e);
        ApiError::from(e)
    })
}
