use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use config::Config;
use shared::repositories::archive_repository::{
    ArchiveRepository, DynamoDbArchiveRepository, InMemoryArchiveRepository,
};
use shared::repositories::solver_repository::HttpSolverRepository;
use shared::services::archive_service::ArchiveService;
use shared::services::catalog_service::CatalogService;
use shared::services::match_service::MatchService;
use shared::services::position_service::PositionService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Set up services
    let solver = Arc::new(HttpSolverRepository::new(config.data_sources.clone()));
    let archive_repository: Arc<dyn ArchiveRepository + Send + Sync> =
        match &config.archive_table {
            Some(table_name) => {
                let aws_config = aws_config::load_from_env().await;
                let client = aws_sdk_dynamodb::Client::new(&aws_config);
                info!("Archiving matches to DynamoDB table {}", table_name);
                Arc::new(DynamoDbArchiveRepository::new(client, table_name))
            }
            None => {
                info!("Archiving matches in memory");
                Arc::new(InMemoryArchiveRepository::new())
            }
        };

    let match_service = MatchService::new(
        CatalogService::new(solver.clone()),
        PositionService::new(solver),
        ArchiveService::new(archive_repository),
    );
    let app_state = state::AppState::new(match_service);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Merge routes
    let app = Router::new()
        .route("/health", get(routes::health::health_check))
        .merge(routes::catalog::routes())
        .merge(routes::matches::routes())
        .merge(routes::users::routes())
        .layer(cors)
        .with_state(app_state);

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    info!("Listening on {}", config.bind_address);
    axum::serve(listener, app).await?;
    Ok(())
}
