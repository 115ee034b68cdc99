use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::catalog::GameTypeId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionValue {
    Win,
    Lose,
    Tie,
    Draw,
}

/// Key of a solved position in the position store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PositionId {
    pub game_type: GameTypeId,
    pub game_id: String,
    pub variant_id: String,
    pub position: String,
}

impl PositionId {
    pub fn new(game_type: GameTypeId, game_id: &str, variant_id: &str, position: &str) -> Self {
        PositionId {
            game_type,
            game_id: game_id.to_string(),
            variant_id: variant_id.to_string(),
            position: position.to_string(),
        }
    }

    /// Same game and variant, different position.
    pub fn sibling(&self, position: &str) -> Self {
        PositionId {
            position: position.to_string(),
            ..self.clone()
        }
    }
}

/// A move as returned by the solver, ordered from most to least favorable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteMove {
    #[serde(rename = "move")]
    pub move_label: String,
    pub move_value: PositionValue,
    pub position: String,
    pub position_value: PositionValue,
    pub remoteness: u32,
    pub delta_remoteness: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedMove {
    #[serde(rename = "move")]
    pub move_label: String,
    pub move_value: PositionValue,
    pub position: String,
    pub position_value: PositionValue,
    pub remoteness: u32,
    pub delta_remoteness: i32,
    pub move_value_opacity: f64,
}

impl AnnotatedMove {
    pub fn from_remote(remote: &RemoteMove, move_value_opacity: f64) -> Self {
        AnnotatedMove {
            move_label: remote.move_label.clone(),
            move_value: remote.move_value,
            position: remote.position.clone(),
            position_value: remote.position_value,
            remoteness: remote.remoteness,
            delta_remoteness: remote.delta_remoteness,
            move_value_opacity,
        }
    }
}

/// Moves available from a position, looked up by label and iterated in the
/// order the solver ranked them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailableMoves {
    moves: Vec<AnnotatedMove>,
}

impl AvailableMoves {
    pub fn get(&self, move_label: &str) -> Option<&AnnotatedMove> {
        self.moves.iter().find(|m| m.move_label == move_label)
    }

    /// Inserts a move, replacing any move with the same label in place.
    pub fn insert(&mut self, annotated: AnnotatedMove) {
        match self
            .moves
            .iter_mut()
            .find(|m| m.move_label == annotated.move_label)
        {
            Some(existing) => *existing = annotated,
            None => self.moves.push(annotated),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedMove> {
        self.moves.iter()
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub key: String,
    pub status: String,
    pub last_updated: DateTime<Utc>,
    pub position_value: PositionValue,
    pub remoteness: u32,
    pub available_moves: AvailableMoves,
}

impl Position {
    /// Terminal positions have remoteness 0; draws never terminate.
    pub fn is_terminal(&self) -> bool {
        self.remoteness == 0 && self.position_value != PositionValue::Draw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn annotated(label: &str, target: &str) -> AnnotatedMove {
        AnnotatedMove {
            move_label: label.to_string(),
            move_value: PositionValue::Win,
            position: target.to_string(),
            position_value: PositionValue::Lose,
            remoteness: 3,
            delta_remoteness: 0,
            move_value_opacity: 1.0,
        }
    }

    #[test]
    fn test_available_moves_keep_insertion_order() {
        let mut moves = AvailableMoves::default();
        moves.insert(annotated("b", "pos-b"));
        moves.insert(annotated("a", "pos-a"));

        let labels: Vec<&str> = moves.iter().map(|m| m.move_label.as_str()).collect();
        assert_eq!(labels, vec!["b", "a"]);
        assert_eq!(moves.get("a").unwrap().position, "pos-a");
        assert!(moves.get("c").is_none());
    }

    #[test]
    fn test_available_moves_replace_duplicate_label() {
        let mut moves = AvailableMoves::default();
        moves.insert(annotated("a", "first"));
        moves.insert(annotated("b", "pos-b"));
        moves.insert(annotated("a", "second"));

        assert_eq!(moves.len(), 2);
        assert_eq!(moves.iter().next().unwrap().position, "second");
    }

    #[test]
    fn test_remote_move_deserializes_from_solver_json() {
        let json = r#"{
            "move": "A1",
            "moveValue": "win",
            "position": "x--------",
            "positionValue": "lose",
            "remoteness": 4,
            "deltaRemoteness": 0
        }"#;

        let remote: RemoteMove = serde_json::from_str(json).unwrap();

        assert_eq!(remote.move_label, "A1");
        assert_eq!(remote.move_value, PositionValue::Win);
        assert_eq!(remote.position_value, PositionValue::Lose);
        assert_eq!(remote.remoteness, 4);
    }

    #[test]
    fn test_sibling_keeps_game_and_variant() {
        let id = PositionId::new(GameTypeId::TwoPlayer, "ttt", "regular", "start");
        let next = id.sibling("x--");

        assert_eq!(next.game_id, "ttt");
        assert_eq!(next.variant_id, "regular");
        assert_eq!(next.position, "x--");
    }
}
