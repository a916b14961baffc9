use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use lungmap_core::error::CoreError;
use lungmap_pipeline::{IngestError, TrainError};
use lungmap_sparql::SparqlError;
use lungmap_storage::StorageFetchError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `lungmap_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An upstream knowledge-graph query failure.
    #[error(transparent)]
    Sparql(#[from] SparqlError),

    /// An object-storage fetch or conversion failure.
    #[error(transparent)]
    Storage(#[from] StorageFetchError),

    /// An experiment ingest failure.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// A classifier training failure.
    #[error(transparent)]
    Train(#[from] TrainError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource with a human-readable message, for cases the
    /// entity/id form of [`CoreError::NotFound`] cannot express.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => classify_core_error(core),

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Upstream gateway errors ---
            AppError::Sparql(err) => classify_sparql_error(err),

            // --- Object storage errors ---
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage fetch error");
                (
                    StatusCode::BAD_GATEWAY,
                    "STORAGE_ERROR",
                    err.to_string(),
                )
            }

            // --- Pipeline errors ---
            AppError::Ingest(err) => match err {
                IngestError::Sparql(e) => classify_sparql_error(e),
                IngestError::Db(e) => classify_sqlx_error(e),
            },
            AppError::Train(err) => match err {
                TrainError::ImageSetNotFound(id) => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("ImageSet with id {id} not found"),
                ),
                TrainError::NoTrainingData { .. } | TrainError::MissingCache { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "TRAINING_DATA_ERROR",
                    err.to_string(),
                ),
                TrainError::Decode { image_id, source } => {
                    tracing::error!(image_id, error = %source, "Cached binary is undecodable");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
                TrainError::Core(e) => classify_core_error(e),
                TrainError::Db(e) => classify_sqlx_error(e),
            },

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Upstream failures surface as 502: the request was well-formed but the
/// knowledge graph could not answer it coherently.
fn classify_sparql_error(err: &SparqlError) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %err, "Upstream SPARQL error");
    (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR", err.to_string())
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() == Some("23505") {
                let constraint = db_err.constraint().unwrap_or("unknown");
                if constraint.starts_with("uq_") {
                    return (
                        StatusCode::CONFLICT,
                        "CONFLICT",
                        format!("Duplicate value violates unique constraint: {constraint}"),
                    );
                }
            }
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
