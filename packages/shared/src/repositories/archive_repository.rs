use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use serde::{Deserialize, Serialize};
use serde_dynamo::{from_item, to_item};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::models::game_match::Match;
use crate::models::user::User;
use crate::repositories::errors::archive_repository_errors::ArchiveRepositoryError;

#[cfg(test)]
use mockall::automock;

/// Per-player storage of finished or abandoned matches.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ArchiveRepository: Send + Sync {
    /// Stores `game_match` for `user_id`, overwriting any match with the same id.
    async fn save_match(
        &self,
        user_id: &str,
        game_match: &Match,
    ) -> Result<(), ArchiveRepositoryError>;

    /// Returns the user with every archived match. Unknown users have none.
    async fn get_user(&self, user_id: &str) -> Result<User, ArchiveRepositoryError>;

    async fn match_ids(&self, user_id: &str) -> Result<Vec<u32>, ArchiveRepositoryError>;
}

#[derive(Default)]
pub struct InMemoryArchiveRepository {
    users: RwLock<HashMap<String, User>>,
}

impl InMemoryArchiveRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ArchiveRepository for InMemoryArchiveRepository {
    async fn save_match(
        &self,
        user_id: &str,
        game_match: &Match,
    ) -> Result<(), ArchiveRepositoryError> {
        let mut users = self.users.write().await;
        users
            .entry(user_id.to_string())
            .or_insert_with(|| User::new(user_id))
            .matches
            .insert(game_match.id, game_match.clone());
        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<User, ArchiveRepositoryError> {
        let users = self.users.read().await;
        Ok(users
            .get(user_id)
            .cloned()
            .unwrap_or_else(|| User::new(user_id)))
    }

    async fn match_ids(&self, user_id: &str) -> Result<Vec<u32>, ArchiveRepositoryError> {
        let users = self.users.read().await;
        Ok(users
            .get(user_id)
            .map(|user| user.match_ids().collect())
            .unwrap_or_default())
    }
}

/// One archived match. Partition key `user_id`, sort key `match_id`.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ArchivedMatchItem {
    user_id: String,
    match_id: u32,
    game_match: Match,
}

pub struct DynamoDbArchiveRepository {
    pub client: Client,
    pub table_name: String,
}

impl DynamoDbArchiveRepository {
    pub fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }

    async fn query_user(
        &self,
        user_id: &str,
        projection: Option<&str>,
    ) -> Result<Vec<HashMap<String, AttributeValue>>, ArchiveRepositoryError> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .query()
                .table_name(&self.table_name)
                .key_condition_expression("user_id = :user_id")
                .expression_attribute_values(":user_id", AttributeValue::S(user_id.to_string()))
                .set_projection_expression(projection.map(|p| p.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(|e| ArchiveRepositoryError::DynamoDb(e.to_string()))?;

            items.extend(output.items.unwrap_or_default());
            start_key = output.last_evaluated_key;
            if start_key.is_none() {
                break;
            }
        }

        Ok(items)
    }
}

#[async_trait]
impl ArchiveRepository for DynamoDbArchiveRepository {
    async fn save_match(
        &self,
        user_id: &str,
        game_match: &Match,
    ) -> Result<(), ArchiveRepositoryError> {
        let record = ArchivedMatchItem {
            user_id: user_id.to_string(),
            match_id: game_match.id,
            game_match: game_match.clone(),
        };
        let item =
            to_item(&record).map_err(|e| ArchiveRepositoryError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await
            .map_err(|e| ArchiveRepositoryError::DynamoDb(e.to_string()))?;

        Ok(())
    }

    async fn get_user(&self, user_id: &str) -> Result<User, ArchiveRepositoryError> {
        let mut user = User::new(user_id);
        for item in self.query_user(user_id, None).await? {
            let record: ArchivedMatchItem = from_item(item)
                .map_err(|e| ArchiveRepositoryError::Serialization(e.to_string()))?;
            user.matches.insert(record.match_id, record.game_match);
        }
        Ok(user)
    }

    async fn match_ids(&self, user_id: &str) -> Result<Vec<u32>, ArchiveRepositoryError> {
        self.query_user(user_id, Some("match_id"))
            .await?
            .into_iter()
            .map(|item| match item.get("match_id") {
                Some(AttributeValue::N(n)) => n
                    .parse::<u32>()
                    .map_err(|e| ArchiveRepositoryError::Serialization(e.to_string())),
                _ => Err(ArchiveRepositoryError::Serialization(
                    "match_id attribute missing".to_string(),
                )),
            })
            .collect()
    }
}
