//! Domain errors shared by the repository, API, and client layers.

use crate::types::DbId;

/// Failure of a domain operation, independent of any transport.
///
/// The API layer maps each variant onto an HTTP status; see
/// `marvedge_api::error::AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}
