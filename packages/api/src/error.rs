use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::repositories::errors::archive_repository_errors::ArchiveRepositoryError;
use shared::services::errors::{
    catalog_service_errors::CatalogServiceError, match_service_errors::MatchServiceError,
};

use crate::models::ErrorResponse;

#[derive(Debug)]
pub enum ApiError {
    CatalogService(CatalogServiceError),
    MatchService(MatchServiceError),
    Archive(ArchiveRepositoryError),
    BadRequest(String),
}

impl From<CatalogServiceError> for ApiError {
    fn from(error: CatalogServiceError) -> Self {
        ApiError::CatalogService(error)
    }
}

impl From<MatchServiceError> for ApiError {
    fn from(error: MatchServiceError) -> Self {
        ApiError::MatchService(error)
    }
}

impl From<ArchiveRepositoryError> for ApiError {
    fn from(error: ArchiveRepositoryError) -> Self {
        ApiError::Archive(error)
    }
}

fn catalog_status(error: &CatalogServiceError) -> StatusCode {
    match error {
        CatalogServiceError::RemoteFetchFailure(_) => StatusCode::BAD_GATEWAY,
        CatalogServiceError::UnknownGame(_)
        | CatalogServiceError::UnknownVariant(_)
        | CatalogServiceError::UnknownPosition(_) => StatusCode::NOT_FOUND,
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CatalogService(error) => catalog_status(error),
            ApiError::MatchService(MatchServiceError::CatalogError(error)) => catalog_status(error),
            ApiError::MatchService(MatchServiceError::NoActiveMatch) => StatusCode::NOT_FOUND,
            ApiError::MatchService(MatchServiceError::MoveNotAvailable(_)) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::MatchService(
                MatchServiceError::NoPreviousRound | MatchServiceError::NoNextRound,
            ) => StatusCode::CONFLICT,
            ApiError::MatchService(
                MatchServiceError::ArchiveError(_) | MatchServiceError::MatchIdSpaceExhausted,
            ) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Archive(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::CatalogService(error) => error.to_string(),
            ApiError::MatchService(error) => error.to_string(),
            ApiError::Archive(error) => error.to_string(),
            ApiError::BadRequest(msg) => msg.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.message(),
        };
        (self.status(), Json(body)).into_response()
    }
}
