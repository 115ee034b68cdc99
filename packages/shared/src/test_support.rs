use chrono::Utc;

use crate::models::catalog::GameTypeId;
use crate::models::game_match::{Match, MatchConfig, MatchType};
use crate::models::position::{AvailableMoves, Position, PositionValue};

pub fn position(key: &str, value: PositionValue, remoteness: u32) -> Position {
    Position {
        key: key.to_string(),
        status: "available".to_string(),
        last_updated: Utc::now(),
        position_value: value,
        remoteness,
        available_moves: AvailableMoves::default(),
    }
}

pub fn pvp_config() -> MatchConfig {
    MatchConfig {
        game_type: GameTypeId::TwoPlayer,
        game_id: "ttt".to_string(),
        variant_id: "regular".to_string(),
        match_type: MatchType::Pvp,
        starting_player_id: "p1".to_string(),
    }
}

pub fn sample_match(id: u32) -> Match {
    Match::new(
        id,
        &pvp_config(),
        position("---------", PositionValue::Tie, 9),
        Utc::now(),
    )
}
