use crate::repositories::errors::solver_repository_errors::SolverRepositoryError;

/// Errors of the catalog and position stores. Every failed solver call,
/// whatever its cause, is a `RemoteFetchFailure`.
#[derive(Debug)]
pub enum CatalogServiceError {
    RemoteFetchFailure(String),
    UnknownGame(String),
    UnknownVariant(String),
    UnknownPosition(String),
}

impl std::fmt::Display for CatalogServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogServiceError::RemoteFetchFailure(msg) => {
                write!(f, "Remote fetch failed: {}", msg)
            }
            CatalogServiceError::UnknownGame(id) => write!(f, "Unknown game: {}", id),
            CatalogServiceError::UnknownVariant(id) => write!(f, "Unknown variant: {}", id),
            CatalogServiceError::UnknownPosition(id) => write!(f, "Unknown position: {}", id),
        }
    }
}

impl std::error::Error for CatalogServiceError {}

impl From<SolverRepositoryError> for CatalogServiceError {
    fn from(err: SolverRepositoryError) -> Self {
        CatalogServiceError::RemoteFetchFailure(err.to_string())
    }
}
