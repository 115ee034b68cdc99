pub mod models;
pub mod repositories;
pub mod services;

pub use models::catalog::{Game, GameType, GameTypeId, Variant};
pub use models::game_match::{Match, MatchConfig, MatchType, Round};
pub use models::position::{AnnotatedMove, AvailableMoves, Position, PositionId, PositionValue};
pub use models::user::User;

#[cfg(test)]
pub(crate) mod test_support;
