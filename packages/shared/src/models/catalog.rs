use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Partition of the catalog. Decides which solver dataset is queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameTypeId {
    Puzzles,
    TwoPlayer,
}

impl GameTypeId {
    pub const ALL: [GameTypeId; 2] = [GameTypeId::Puzzles, GameTypeId::TwoPlayer];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameTypeId::Puzzles => "puzzles",
            GameTypeId::TwoPlayer => "two-player",
        }
    }

    pub fn is_single_player(&self) -> bool {
        matches!(self, GameTypeId::Puzzles)
    }
}

impl fmt::Display for GameTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameTypeId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "puzzles" => Ok(GameTypeId::Puzzles),
            "two-player" => Ok(GameTypeId::TwoPlayer),
            other => Err(format!("Unknown game type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameType {
    pub id: GameTypeId,
    pub games: HashMap<String, Game>,
    pub status: String,
    pub last_updated: Option<DateTime<Utc>>,
}

impl GameType {
    pub fn new(id: GameTypeId) -> Self {
        GameType {
            id,
            games: HashMap::new(),
            status: String::new(),
            last_updated: None,
        }
    }
}

/// A game as listed by the solver. The descriptive fields stay empty until
/// its variants have been fetched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub name: String,
    pub game_type: GameTypeId,
    pub status: String,
    pub author: Option<String>,
    pub date_created: Option<String>,
    pub description: Option<String>,
    pub instructions: Option<String>,
    pub variants: VariantCatalog,
}

impl Game {
    pub fn new(id: &str, name: &str, game_type: GameTypeId, status: &str) -> Self {
        Game {
            id: id.to_string(),
            name: name.to_string(),
            game_type,
            status: status.to_string(),
            author: None,
            date_created: None,
            description: None,
            instructions: None,
            variants: VariantCatalog::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VariantCatalog {
    pub variants: HashMap<String, Variant>,
    pub status: String,
    pub last_updated: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    pub id: String,
    pub description: String,
    pub start_position: String,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("puzzles", GameTypeId::Puzzles)]
    #[case("two-player", GameTypeId::TwoPlayer)]
    fn test_game_type_id_parses(#[case] input: &str, #[case] expected: GameTypeId) {
        assert_eq!(input.parse::<GameTypeId>().unwrap(), expected);
        assert_eq!(expected.to_string(), input);
    }

    #[test]
    fn test_game_type_id_rejects_unknown() {
        assert!("chess".parse::<GameTypeId>().is_err());
    }

    #[test]
    fn test_only_puzzles_are_single_player() {
        assert!(GameTypeId::Puzzles.is_single_player());
        assert!(!GameTypeId::TwoPlayer.is_single_player());
    }

    #[test]
    fn test_game_type_id_serialization() {
        let serialized = serde_json::to_string(&GameTypeId::TwoPlayer).unwrap();
        assert_eq!(serialized, "\"two-player\"");
    }

    #[test]
    fn test_new_game_has_no_variants() {
        let game = Game::new("ttt", "Tic-Tac-Toe", GameTypeId::TwoPlayer, "available");

        assert!(game.variants.variants.is_empty());
        assert!(game.variants.last_updated.is_none());
        assert!(game.author.is_none());
        assert_eq!(game.name, "Tic-Tac-Toe");
    }
}
