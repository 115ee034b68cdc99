pub mod catalog;
pub mod game_match;
pub mod position;
pub mod solver;
pub mod user;
