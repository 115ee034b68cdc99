use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::models::game_match::Match;
use crate::models::user::User;
use crate::repositories::archive_repository::ArchiveRepository;
use crate::repositories::errors::archive_repository_errors::ArchiveRepositoryError;

#[derive(Clone)]
pub struct ArchiveService {
    repository: Arc<dyn ArchiveRepository + Send + Sync>,
}

impl ArchiveService {
    pub fn new(repository: Arc<dyn ArchiveRepository + Send + Sync>) -> Self {
        ArchiveService { repository }
    }

    /// Copies the match into the archive of every listed player. Archiving
    /// the same id twice overwrites the earlier copy.
    pub async fn archive(
        &self,
        game_match: &Match,
        players: &[String],
    ) -> Result<(), ArchiveRepositoryError> {
        for player_id in players {
            self.repository.save_match(player_id, game_match).await?;
        }
        info!(
            "Archived match {} for {} players",
            game_match.id,
            players.len()
        );
        Ok(())
    }

    /// Every match id already used by any of the players.
    pub async fn reserved_match_ids(
        &self,
        players: &[String],
    ) -> Result<HashSet<u32>, ArchiveRepositoryError> {
        let mut reserved = HashSet::new();
        for player_id in players {
            reserved.extend(self.repository.match_ids(player_id).await?);
        }
        Ok(reserved)
    }

    pub async fn user(&self, player_id: &str) -> Result<User, ArchiveRepositoryError> {
        self.repository.get_user(player_id).await
    }
}
