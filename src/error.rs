use crate::catalog::EntityGroup;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum AppError {
    /// Entity with the given identifier does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound {
        /// Entity kind.
        entity: EntityGroup,
        /// Requested identifier.
        id: i64,
    },

    /// Entity with the same identifier already exists.
    #[error("{entity} with such id already exists")]
    AlreadyExists {
        /// Entity kind.
        entity: EntityGroup,
    },

    /// Entity with the same unique name already exists.
    #[error("{entity} with such name already exists")]
    NameConflict {
        /// Entity kind.
        entity: EntityGroup,
    },

    /// Deletion blocked by dependent records.
    #[error("{entity} with id {id} has {count} related book(s), use forcibly=true to delete")]
    RelatedEntitiesPresent {
        /// Entity kind that was going to be deleted.
        entity: EntityGroup,
        /// Identifier of that entity.
        id: i64,
        /// Number of dependent books.
        count: i64,
    },

    /// Search query is empty after trimming.
    #[error("Search query must not be blank")]
    BlankQuery,

    /// Search query is not long enough.
    #[error("Search query '{query}' is too short, it must be at least {minimum} characters long")]
    QueryTooShort {
        /// Trimmed query.
        query: String,
        /// Shortest accepted length.
        minimum: usize,
    },

    /// Sort key is not a public key of the entity group.
    #[error("No such sort key: '{key}'")]
    UnknownSortKey {
        /// Rejected key.
        key: String,
    },

    /// Order type is neither `asc` nor `desc`.
    #[error("Invalid order type: '{value}', expected 'asc' or 'desc'")]
    InvalidOrderType {
        /// Rejected value.
        value: String,
    },

    /// Page number is not positive.
    #[error("Page value must be greater than zero")]
    InvalidPage,

    /// Page size is not positive.
    #[error("Size value must be greater than zero")]
    InvalidSize,

    /// Path identifier differs from body identifier.
    #[error("Identifier in path does not match identifier in body")]
    IdMismatch,

    /// Transfer object failed validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AlreadyExists { .. }
            | AppError::NameConflict { .. }
            | AppError::RelatedEntitiesPresent { .. } => StatusCode::CONFLICT,
            AppError::BlankQuery
            | AppError::QueryTooShort { .. }
            | AppError::UnknownSortKey { .. }
            | AppError::InvalidOrderType { .. }
            | AppError::InvalidPage
            | AppError::InvalidSize
            | AppError::IdMismatch
            | AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Io(_) | AppError::Config(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request error");
        } else {
            tracing::debug!(error = %self, status = status.as_u16(), "Request rejected");
        }

        let body = json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": self.to_string(),
        });

        (status, Json(body)).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, AppError>;
