use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::models::catalog::GameTypeId;
use crate::models::position::PositionId;
use crate::models::solver::responses::{GamesResponse, PositionResponse, VariantsResponse};
use crate::repositories::errors::solver_repository_errors::SolverRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Base URLs of the single-player and two-player solver datasets.
#[derive(Debug, Clone, PartialEq)]
pub struct DataSources {
    pub one_player_api: String,
    pub two_player_api: String,
}

impl DataSources {
    pub fn new(one_player_api: &str, two_player_api: &str) -> Self {
        DataSources {
            one_player_api: one_player_api.trim_end_matches('/').to_string(),
            two_player_api: two_player_api.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self, game_type: GameTypeId) -> &str {
        if game_type.is_single_player() {
            &self.one_player_api
        } else {
            &self.two_player_api
        }
    }

    pub fn games_url(&self, game_type: GameTypeId) -> String {
        self.base(game_type).to_string()
    }

    pub fn variants_url(&self, game_type: GameTypeId, game_id: &str) -> String {
        format!("{}/{}", self.base(game_type), game_id)
    }

    pub fn position_url(&self, id: &PositionId) -> String {
        let base = self.base(id.game_type);
        if id.game_type.is_single_player() {
            format!("{}/{}/{}/{}", base, id.game_id, id.variant_id, id.position)
        } else {
            format!(
                "{}/{}/variants/{}/positions/{}",
                base, id.game_id, id.variant_id, id.position
            )
        }
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait SolverRepository: Send + Sync {
    async fn load_games(&self, game_type: GameTypeId)
        -> Result<GamesResponse, SolverRepositoryError>;

    async fn load_variants(
        &self,
        game_type: GameTypeId,
        game_id: &str,
    ) -> Result<VariantsResponse, SolverRepositoryError>;

    async fn load_position(&self, id: &PositionId)
        -> Result<PositionResponse, SolverRepositoryError>;
}

pub struct HttpSolverRepository {
    pub client: Client,
    pub data_sources: DataSources,
}

impl HttpSolverRepository {
    pub fn new(data_sources: DataSources) -> Self {
        HttpSolverRepository {
            client: Client::new(),
            data_sources,
        }
    }

    async fn fetch<T: DeserializeOwned>(&self, url: &str) -> Result<T, SolverRepositoryError> {
        debug!("Fetching {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SolverRepositoryError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SolverRepositoryError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SolverRepositoryError::Http(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| SolverRepositoryError::Decode(e.to_string()))
    }
}

#[async_trait]
impl SolverRepository for HttpSolverRepository {
    async fn load_games(
        &self,
        game_type: GameTypeId,
    ) -> Result<GamesResponse, SolverRepositoryError> {
        self.fetch(&self.data_sources.games_url(game_type)).await
    }

    async fn load_variants(
        &self,
        game_type: GameTypeId,
        game_id: &str,
    ) -> Result<VariantsResponse, SolverRepositoryError> {
        self.fetch(&self.data_sources.variants_url(game_type, game_id))
            .await
    }

    async fn load_position(
        &self,
        id: &PositionId,
    ) -> Result<PositionResponse, SolverRepositoryError> {
        self.fetch(&self.data_sources.position_url(id)).await
    }
}
