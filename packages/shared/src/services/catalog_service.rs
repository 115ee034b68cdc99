use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::catalog::{Game, GameType, GameTypeId, Variant};
use crate::repositories::solver_repository::SolverRepository;
use crate::services::errors::catalog_service_errors::CatalogServiceError;
use crate::services::freshness::FreshnessPolicy;

/// Cache of game types, games and variants listed by the solver.
pub struct CatalogService {
    repository: Arc<dyn SolverRepository + Send + Sync>,
    policy: FreshnessPolicy,
    game_types: HashMap<GameTypeId, GameType>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn SolverRepository + Send + Sync>) -> Self {
        Self::with_policy(repository, FreshnessPolicy::default())
    }

    pub fn with_policy(
        repository: Arc<dyn SolverRepository + Send + Sync>,
        policy: FreshnessPolicy,
    ) -> Self {
        CatalogService {
            repository,
            policy,
            game_types: HashMap::new(),
        }
    }

    pub fn game_type(&self, game_type: GameTypeId) -> Option<&GameType> {
        self.game_types.get(&game_type)
    }

    pub fn game(&self, game_type: GameTypeId, game_id: &str) -> Option<&Game> {
        self.game_type(game_type)?.games.get(game_id)
    }

    pub fn variant(&self, game_type: GameTypeId, game_id: &str, variant_id: &str) -> Option<&Variant> {
        self.game(game_type, game_id)?
            .variants
            .variants
            .get(variant_id)
    }

    pub async fn load_games(
        &mut self,
        game_type: GameTypeId,
        force: bool,
    ) -> Result<(), CatalogServiceError> {
        self.load_games_at(game_type, force, Utc::now()).await
    }

    /// Refreshes the game list of a partition when it is stale. New games are
    /// added and known games updated in place, keeping their variants.
    pub async fn load_games_at(
        &mut self,
        game_type: GameTypeId,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<(), CatalogServiceError> {
        let last_updated = self.game_type(game_type).and_then(|p| p.last_updated);
        if !self.policy.should_refetch(last_updated, force, now) {
            debug!("Games for {} are fresh", game_type);
            return Ok(());
        }

        let response = self.repository.load_games(game_type).await.map_err(|e| {
            warn!("Failed to load games for {}: {}", game_type, e);
            CatalogServiceError::from(e)
        })?;

        let partition = self
            .game_types
            .entry(game_type)
            .or_insert_with(|| GameType::new(game_type));
        partition.status = response.status;

        let count = response.response.len();
        for entry in response.response {
            match partition.games.get_mut(&entry.game_id) {
                Some(game) => {
                    game.name = entry.name;
                    game.status = entry.status;
                }
                None => {
                    let game = Game::new(&entry.game_id, &entry.name, game_type, &entry.status);
                    partition.games.insert(entry.game_id, game);
                }
            }
        }
        partition.last_updated = Some(now);

        info!("Loaded {} games for {}", count, game_type);
        Ok(())
    }

    pub async fn load_variants(
        &mut self,
        game_type: GameTypeId,
        game_id: &str,
        force: bool,
    ) -> Result<(), CatalogServiceError> {
        self.load_variants_at(game_type, game_id, force, Utc::now())
            .await
    }

    /// Refreshes the variants of a game when they are stale, loading the
    /// game list first if the partition has never been filled.
    pub async fn load_variants_at(
        &mut self,
        game_type: GameTypeId,
        game_id: &str,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<(), CatalogServiceError> {
        let has_games = self
            .game_type(game_type)
            .map(|p| !p.games.is_empty())
            .unwrap_or(false);
        if !has_games {
            self.load_games_at(game_type, false, now).await?;
        }

        let last_updated = self
            .game(game_type, game_id)
            .ok_or_else(|| CatalogServiceError::UnknownGame(game_id.to_string()))?
            .variants
            .last_updated;
        if !self.policy.should_refetch(last_updated, force, now) {
            debug!("Variants for {} are fresh", game_id);
            return Ok(());
        }

        let response = self
            .repository
            .load_variants(game_type, game_id)
            .await
            .map_err(|e| {
                warn!("Failed to load variants for {}: {}", game_id, e);
                CatalogServiceError::from(e)
            })?;

        let game = self
            .game_types
            .get_mut(&game_type)
            .and_then(|p| p.games.get_mut(game_id))
            .ok_or_else(|| CatalogServiceError::UnknownGame(game_id.to_string()))?;

        let payload = response.response;
        if game_type.is_single_player() {
            game.author = payload.author;
        }
        game.date_created = payload.date_created;
        game.description = payload.description;
        game.instructions = payload.instructions;

        let count = payload.variants.len();
        for entry in payload.variants {
            let variant = Variant {
                id: entry.variant_id.clone(),
                description: entry.description,
                start_position: entry.start_position,
                status: entry.status,
            };
            game.variants.variants.insert(entry.variant_id, variant);
        }
        game.variants.status = response.status;
        game.variants.last_updated = Some(now);

        info!("Loaded {} variants for {}", count, game_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::solver::responses::{
        GameEntry, GamesResponse, SolverEnvelope, VariantEntry, VariantsPayload, VariantsResponse,
    };
    use crate::repositories::errors::solver_repository_errors::SolverRepositoryError;
    use crate::repositories::solver_repository::MockSolverRepository;
    use chrono::Duration;

    fn games(ids: &[&str]) -> GamesResponse {
        SolverEnvelope {
            status: "available".to_string(),
            response: ids
                .iter()
                .map(|id| GameEntry {
                    game_id: id.to_string(),
                    name: id.to_uppercase(),
                    status: "available".to_string(),
                })
                .collect(),
        }
    }

    fn variants(game_id: &str, variant_ids: &[&str]) -> VariantsResponse {
        SolverEnvelope {
            status: "available".to_string(),
            response: VariantsPayload {
                author: Some("GamesCrafters".to_string()),
                date_created: Some("2020".to_string()),
                description: Some(format!("About {}", game_id)),
                instructions: Some("Play well".to_string()),
                variants: variant_ids
                    .iter()
                    .map(|id| VariantEntry {
                        variant_id: id.to_string(),
                        description: format!("{} variant", id),
                        start_position: format!("{}-start", id),
                        status: "available".to_string(),
                    })
                    .collect(),
            },
        }
    }

    #[tokio::test]
    async fn test_fresh_games_are_not_refetched() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(1)
            .returning(|_| Ok(games(&["ttt"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));
        let now = Utc::now();

        service
            .load_games_at(GameTypeId::TwoPlayer, false, now - Duration::days(2))
            .await
            .unwrap();
        service
            .load_games_at(GameTypeId::TwoPlayer, false, now)
            .await
            .unwrap();

        assert!(service.game(GameTypeId::TwoPlayer, "ttt").is_some());
    }

    #[tokio::test]
    async fn test_stale_games_are_refetched() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(2)
            .returning(|_| Ok(games(&["ttt"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));
        let now = Utc::now();

        service
            .load_games_at(GameTypeId::TwoPlayer, false, now - Duration::days(4))
            .await
            .unwrap();
        service
            .load_games_at(GameTypeId::TwoPlayer, false, now)
            .await
            .unwrap();

        assert_eq!(
            service.game_type(GameTypeId::TwoPlayer).unwrap().last_updated,
            Some(now)
        );
    }

    #[tokio::test]
    async fn test_forced_load_ignores_freshness() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(2)
            .returning(|_| Ok(games(&["ttt"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));

        service.load_games(GameTypeId::Puzzles, false).await.unwrap();
        service.load_games(GameTypeId::Puzzles, true).await.unwrap();
    }

    #[tokio::test]
    async fn test_games_are_merged_not_replaced() {
        let mut mock_repo = MockSolverRepository::new();
        let mut calls = 0;
        mock_repo.expect_load_games().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(games(&["ttt", "connect4"]))
            } else {
                Ok(games(&["chess"]))
            }
        });
        let mut service = CatalogService::new(Arc::new(mock_repo));

        service.load_games(GameTypeId::TwoPlayer, false).await.unwrap();
        service.load_games(GameTypeId::TwoPlayer, true).await.unwrap();

        let partition = service.game_type(GameTypeId::TwoPlayer).unwrap();
        assert_eq!(partition.games.len(), 3);
        for id in ["ttt", "connect4", "chess"] {
            assert!(partition.games.contains_key(id), "missing {}", id);
        }
    }

    #[tokio::test]
    async fn test_reloading_games_keeps_variants() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(2)
            .returning(|_| Ok(games(&["ttt"])));
        mock_repo
            .expect_load_variants()
            .times(1)
            .returning(|_, game_id| Ok(variants(game_id, &["regular"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));

        service
            .load_variants(GameTypeId::TwoPlayer, "ttt", false)
            .await
            .unwrap();
        service.load_games(GameTypeId::TwoPlayer, true).await.unwrap();

        assert!(service
            .variant(GameTypeId::TwoPlayer, "ttt", "regular")
            .is_some());
    }

    #[tokio::test]
    async fn test_failed_games_load_leaves_catalog_untouched() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(1)
            .returning(|_| Err(SolverRepositoryError::Status(503)));
        let mut service = CatalogService::new(Arc::new(mock_repo));

        let result = service.load_games(GameTypeId::TwoPlayer, false).await;

        assert!(matches!(
            result,
            Err(CatalogServiceError::RemoteFetchFailure(_))
        ));
        assert!(service.game_type(GameTypeId::TwoPlayer).is_none());
    }

    #[tokio::test]
    async fn test_load_variants_loads_games_first() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(1)
            .returning(|_| Ok(games(&["hanoi"])));
        mock_repo
            .expect_load_variants()
            .times(1)
            .returning(|_, game_id| Ok(variants(game_id, &["3", "4"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));

        service
            .load_variants(GameTypeId::Puzzles, "hanoi", false)
            .await
            .unwrap();

        let game = service.game(GameTypeId::Puzzles, "hanoi").unwrap();
        assert_eq!(game.author.as_deref(), Some("GamesCrafters"));
        assert_eq!(game.description.as_deref(), Some("About hanoi"));
        assert_eq!(game.instructions.as_deref(), Some("Play well"));
        assert_eq!(game.variants.variants.len(), 2);
        assert_eq!(
            service
                .variant(GameTypeId::Puzzles, "hanoi", "4")
                .unwrap()
                .start_position,
            "4-start"
        );
    }

    #[tokio::test]
    async fn test_two_player_games_record_no_author() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .returning(|_| Ok(games(&["ttt"])));
        mock_repo
            .expect_load_variants()
            .returning(|_, game_id| Ok(variants(game_id, &["regular"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));

        service
            .load_variants(GameTypeId::TwoPlayer, "ttt", false)
            .await
            .unwrap();

        let game = service.game(GameTypeId::TwoPlayer, "ttt").unwrap();
        assert!(game.author.is_none());
        assert_eq!(game.date_created.as_deref(), Some("2020"));
    }

    #[tokio::test]
    async fn test_fresh_variants_are_not_refetched() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .times(1)
            .returning(|_| Ok(games(&["ttt"])));
        mock_repo
            .expect_load_variants()
            .times(1)
            .returning(|_, game_id| Ok(variants(game_id, &["regular"])));
        let mut service = CatalogService::new(Arc::new(mock_repo));
        let now = Utc::now();

        service
            .load_variants_at(GameTypeId::TwoPlayer, "ttt", false, now - Duration::days(2))
            .await
            .unwrap();
        service
            .load_variants_at(GameTypeId::TwoPlayer, "ttt", false, now)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_unknown_game_is_reported() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .returning(|_| Ok(games(&["ttt"])));
        mock_repo.expect_load_variants().times(0);
        let mut service = CatalogService::new(Arc::new(mock_repo));

        let result = service
            .load_variants(GameTypeId::TwoPlayer, "go", false)
            .await;

        assert!(matches!(result, Err(CatalogServiceError::UnknownGame(id)) if id == "go"));
    }

    #[tokio::test]
    async fn test_failed_variants_keep_loaded_games() {
        let mut mock_repo = MockSolverRepository::new();
        mock_repo
            .expect_load_games()
            .returning(|_| Ok(games(&["ttt"])));
        mock_repo
            .expect_load_variants()
            .returning(|_, _| Err(SolverRepositoryError::Http("timeout".to_string())));
        let mut service = CatalogService::new(Arc::new(mock_repo));

        let result = service
            .load_variants(GameTypeId::TwoPlayer, "ttt", false)
            .await;

        assert!(result.is_err());
        let game = service.game(GameTypeId::TwoPlayer, "ttt").unwrap();
        assert!(game.variants.last_updated.is_none());
        assert!(game.variants.variants.is_empty());
    }
}
