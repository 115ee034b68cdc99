use crate::repositories::errors::archive_repository_errors::ArchiveRepositoryError;
use crate::services::errors::catalog_service_errors::CatalogServiceError;

#[derive(Debug)]
pub enum MatchServiceError {
    CatalogError(CatalogServiceError),
    ArchiveError(String),
    NoActiveMatch,
    MoveNotAvailable(String),
    NoPreviousRound,
    NoNextRound,
    MatchIdSpaceExhausted,
}

impl std::fmt::Display for MatchServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchServiceError::CatalogError(err) => write!(f, "Catalog error: {}", err),
            MatchServiceError::ArchiveError(msg) => write!(f, "Archive error: {}", msg),
            MatchServiceError::NoActiveMatch => write!(f, "No match in progress"),
            MatchServiceError::MoveNotAvailable(label) => {
                write!(f, "Move {} is not available from this position", label)
            }
            MatchServiceError::NoPreviousRound => write!(f, "No round to undo"),
            MatchServiceError::NoNextRound => write!(f, "No round to redo"),
            MatchServiceError::MatchIdSpaceExhausted => {
                write!(f, "Could not find a free match id")
            }
        }
    }
}

impl std::error::Error for MatchServiceError {}

impl From<CatalogServiceError> for MatchServiceError {
    fn from(err: CatalogServiceError) -> Self {
        MatchServiceError::CatalogError(err)
    }
}

impl From<ArchiveRepositoryError> for MatchServiceError {
    fn from(err: ArchiveRepositoryError) -> Self {
        MatchServiceError::ArchiveError(err.to_string())
    }
}
