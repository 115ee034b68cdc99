use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::models::catalog::GameTypeId;
use crate::models::position::{Position, PositionId};
use crate::repositories::solver_repository::SolverRepository;
use crate::services::catalog_service::CatalogService;
use crate::services::errors::catalog_service_errors::CatalogServiceError;
use crate::services::freshness::FreshnessPolicy;
use crate::services::move_ranker::rank_moves;

/// Outcome of warming the cache one ply ahead.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrefetchReport {
    pub loaded: usize,
    pub failed: Vec<String>,
}

/// Cache of solved positions keyed by game type, game, variant and position.
pub struct PositionService {
    repository: Arc<dyn SolverRepository + Send + Sync>,
    policy: FreshnessPolicy,
    positions: HashMap<PositionId, Position>,
}

impl PositionService {
    pub fn new(repository: Arc<dyn SolverRepository + Send + Sync>) -> Self {
        Self::with_policy(repository, FreshnessPolicy::default())
    }

    pub fn with_policy(
        repository: Arc<dyn SolverRepository + Send + Sync>,
        policy: FreshnessPolicy,
    ) -> Self {
        PositionService {
            repository,
            policy,
            positions: HashMap::new(),
        }
    }

    pub fn position(&self, id: &PositionId) -> Option<&Position> {
        self.positions.get(id)
    }

    pub fn contains(&self, id: &PositionId) -> bool {
        self.positions.contains_key(id)
    }

    pub async fn load_position(
        &mut self,
        id: &PositionId,
        force: bool,
    ) -> Result<&Position, CatalogServiceError> {
        self.load_position_at(id, force, Utc::now()).await
    }

    pub async fn load_position_at(
        &mut self,
        id: &PositionId,
        force: bool,
        now: DateTime<Utc>,
    ) -> Result<&Position, CatalogServiceError> {
        let last_updated = self.positions.get(id).map(|p| p.last_updated);
        if !self.policy.should_refetch(last_updated, force, now) {
            debug!("Position {} is fresh", id.position);
            return self
                .positions
                .get(id)
                .ok_or_else(|| CatalogServiceError::UnknownPosition(id.position.clone()));
        }

        let response = self.repository.load_position(id).await.map_err(|e| {
            warn!("Failed to load position {}: {}", id.position, e);
            CatalogServiceError::from(e)
        })?;

        let payload = response.response;
        let position = Position {
            key: payload.position,
            status: response.status,
            last_updated: now,
            position_value: payload.position_value,
            remoteness: payload.remoteness,
            available_moves: rank_moves(&payload.moves),
        };

        match self.positions.entry(id.clone()) {
            Entry::Occupied(mut slot) => {
                slot.insert(position);
                Ok(slot.into_mut())
            }
            Entry::Vacant(slot) => Ok(slot.insert(position)),
        }
    }

    /// Resolves the start position of a variant through the catalog and
    /// makes sure it is cached.
    pub async fn load_start_position_at(
        &mut self,
        catalog: &mut CatalogService,
        game_type: GameTypeId,
        game_id: &str,
        variant_id: &str,
        now: DateTime<Utc>,
    ) -> Result<PositionId, CatalogServiceError> {
        catalog
            .load_variants_at(game_type, game_id, false, now)
            .await?;

        let variant = catalog
            .variant(game_type, game_id, variant_id)
            .ok_or_else(|| CatalogServiceError::UnknownVariant(variant_id.to_string()))?;
        let id = PositionId::new(game_type, game_id, variant_id, &variant.start_position);

        self.load_position_at(&id, false, now).await?;
        Ok(id)
    }

    pub async fn pre_fetch_next_positions(
        &mut self,
        id: &PositionId,
    ) -> Result<PrefetchReport, CatalogServiceError> {
        self.pre_fetch_next_positions_at(id, Utc::now()).await
    }

    /// Loads every uncached position reachable in one move. A failed target
    /// is recorded and skipped.
    pub async fn pre_fetch_next_positions_at(
        &mut self,
        id: &PositionId,
        now: DateTime<Utc>,
    ) -> Result<PrefetchReport, CatalogServiceError> {
        let targets: Vec<PositionId> = self
            .position(id)
            .ok_or_else(|| CatalogServiceError::UnknownPosition(id.position.clone()))?
            .available_moves
            .iter()
            .map(|m| id.sibling(&m.position))
            .collect();

        let mut report = PrefetchReport::default();
        for target in targets {
            if self.contains(&target) {
                continue;
            }
            match self.load_position_at(&target, false, now).await {
                Ok(_) => report.loaded += 1,
                Err(e) => {
                    warn!("Prefetch of {} failed: {}", target.position, e);
                    report.failed.push(target.position);
                }
            }
        }

        info!(
            "Prefetched {} positions after {} ({} failed)",
            report.loaded,
            id.position,
            report.failed.len()
        );
        Ok(report)
    }
}
