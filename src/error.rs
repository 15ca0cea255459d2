//! Error taxonomy for the routing engine.

use thiserror::Error;

/// Errors surfaced by the library.
///
/// Classification itself never fails: only [`RouterError::InvalidInput`] can
/// escape an entry point. The remaining variants arise when loading alternate
/// catalogs or configuration.
#[derive(Debug, Error)]
pub enum RouterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type RouterResult<T> = Result<T, RouterError>;
