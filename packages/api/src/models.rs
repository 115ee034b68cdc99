use serde::{Deserialize, Serialize};

use shared::models::game_match::Round;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub force: bool,
}

#[derive(Debug, Deserialize)]
pub struct MoveRequest {
    #[serde(rename = "move")]
    pub move_label: String,
}

/// What a history view needs to draw the current match.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub rounds: Vec<Round>,
    pub is_end_of_match: bool,
    pub maximum_remoteness: u32,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
