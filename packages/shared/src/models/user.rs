use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::game_match::Match;

/// A player and the matches archived for them.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: String,
    pub matches: BTreeMap<u32, Match>,
}

impl User {
    pub fn new(id: &str) -> Self {
        User {
            id: id.to_string(),
            matches: BTreeMap::new(),
        }
    }

    pub fn match_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.matches.keys().copied()
    }
}
