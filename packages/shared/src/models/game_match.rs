use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::catalog::GameTypeId;
use crate::models::position::{Position, PositionValue};

/// Match ids are drawn from `0..MATCH_ID_SPACE`.
pub const MATCH_ID_SPACE: u32 = 10_000;

pub const PVP_PLAYERS: [&str; 2] = ["p1", "p2"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    Puzzles,
    Pvp,
    /// Player against the solver.
    Pvc,
}

impl MatchType {
    pub fn players(&self) -> Vec<String> {
        match self {
            MatchType::Pvp => PVP_PLAYERS.iter().map(|p| p.to_string()).collect(),
            MatchType::Puzzles | MatchType::Pvc => vec![],
        }
    }

    /// Puzzles keep a single turn, everything else alternates 1 and 2.
    pub fn next_turn(&self, turn: usize) -> usize {
        match self {
            MatchType::Puzzles => 1,
            MatchType::Pvp | MatchType::Pvc => {
                if turn == 1 {
                    2
                } else {
                    1
                }
            }
        }
    }
}

/// Everything needed to start (or restart) a match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub game_type: GameTypeId,
    pub game_id: String,
    pub variant_id: String,
    pub match_type: MatchType,
    pub starting_player_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub id: u32,
    pub player_id: String,
    #[serde(rename = "move")]
    pub move_label: Option<String>,
    pub move_value: Option<PositionValue>,
    pub position: Position,
}

impl Round {
    pub fn new(id: u32, player_id: &str, position: Position) -> Self {
        Round {
            id,
            player_id: player_id.to_string(),
            move_label: None,
            move_value: None,
            position,
        }
    }
}

/// One match. Round `n` is stored at `rounds[n - 1]`, so round ids always
/// run from 1 without gaps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub id: u32,
    pub game_type: GameTypeId,
    pub game_id: String,
    pub variant_id: String,
    pub match_type: MatchType,
    pub players: Vec<String>,
    pub starting_player_id: String,
    pub rounds: Vec<Round>,
    pub current_round_id: u32,
    pub turn: usize,
    pub created: DateTime<Utc>,
    pub last_played: DateTime<Utc>,
    pub ended: Option<DateTime<Utc>>,
}

impl Match {
    pub fn new(id: u32, config: &MatchConfig, start: Position, now: DateTime<Utc>) -> Self {
        let players = config.match_type.players();
        let turn = turn_of(&players, &config.starting_player_id);
        Match {
            id,
            game_type: config.game_type,
            game_id: config.game_id.clone(),
            variant_id: config.variant_id.clone(),
            match_type: config.match_type,
            players,
            starting_player_id: config.starting_player_id.clone(),
            rounds: vec![Round::new(1, &config.starting_player_id, start)],
            current_round_id: 1,
            turn,
            created: now,
            last_played: now,
            ended: None,
        }
    }

    pub fn config(&self) -> MatchConfig {
        MatchConfig {
            game_type: self.game_type,
            game_id: self.game_id.clone(),
            variant_id: self.variant_id.clone(),
            match_type: self.match_type,
            starting_player_id: self.starting_player_id.clone(),
        }
    }

    pub fn round(&self) -> &Round {
        &self.rounds[self.current_round_id as usize - 1]
    }

    pub fn round_by_id(&self, id: u32) -> Option<&Round> {
        if id == 0 {
            return None;
        }
        self.rounds.get(id as usize - 1)
    }

    /// Rounds played up to and including the current one.
    pub fn history(&self) -> &[Round] {
        &self.rounds[..self.current_round_id as usize]
    }

    /// True once any move has been taken.
    pub fn has_progressed(&self) -> bool {
        self.rounds.len() > 1
    }

    pub fn is_end_of_match(&self) -> bool {
        self.round().position.is_terminal()
    }

    /// Largest remoteness among non-draw positions of rounds `from..=to`, or 0.
    pub fn maximum_remoteness(&self, from: u32, to: u32) -> u32 {
        self.rounds
            .iter()
            .filter(|round| round.id >= from && round.id <= to)
            .filter(|round| round.position.position_value != PositionValue::Draw)
            .map(|round| round.position.remoteness)
            .max()
            .unwrap_or(0)
    }

    /// Turn in effect at `round_id`: round 1 uses the starting player's turn,
    /// every later round follows the rotation of the match type.
    pub fn turn_at_round(&self, round_id: u32) -> usize {
        let mut turn = turn_of(&self.players, &self.starting_player_id);
        for _ in 1..round_id {
            turn = self.match_type.next_turn(turn);
        }
        turn
    }

    /// Player who moves on the given turn. Matches without a player list
    /// are always played by the starting player.
    pub fn player_for_turn(&self, turn: usize) -> String {
        turn.checked_sub(1)
            .and_then(|index| self.players.get(index))
            .cloned()
            .unwrap_or_else(|| self.starting_player_id.clone())
    }
}

/// 1-based turn of `player_id`, or 0 when the match has no such player.
pub fn turn_of(players: &[String], player_id: &str) -> usize {
    players
        .iter()
        .position(|p| p == player_id)
        .map(|index| index + 1)
        .unwrap_or(0)
}
