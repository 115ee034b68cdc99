pub mod catalog;
pub mod health;
pub mod matches;
pub mod users;

use shared::models::catalog::GameTypeId;

use crate::error::ApiError;

pub(crate) fn parse_game_type(game_type: &str) -> Result<GameTypeId, ApiError> {
    game_type.parse().map_err(ApiError::BadRequest)
}
