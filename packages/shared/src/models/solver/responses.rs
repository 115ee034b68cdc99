use serde::{Deserialize, Serialize};

use crate::models::position::{PositionValue, RemoteMove};

/// Every solver endpoint wraps its payload in this envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SolverEnvelope<T> {
    pub status: String,
    pub response: T,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEntry {
    pub game_id: String,
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantEntry {
    pub variant_id: String,
    pub description: String,
    pub start_position: String,
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantsPayload {
    // Only single-player datasets carry an author.
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub date_created: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    pub variants: Vec<VariantEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionPayload {
    pub position: String,
    pub position_value: PositionValue,
    pub remoteness: u32,
    #[serde(default)]
    pub moves: Vec<RemoteMove>,
}

pub type GamesResponse = SolverEnvelope<Vec<GameEntry>>;
pub type VariantsResponse = SolverEnvelope<VariantsPayload>;
pub type PositionResponse = SolverEnvelope<PositionPayload>;
