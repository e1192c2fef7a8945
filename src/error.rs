//! # Error Handling
//!
//! Internal error taxonomy for the status webhook service. None of these
//! surface to the HTTP caller: the provider contract pins the visible
//! responses to 200, 403, and 405, so processing failures are logged and
//! swallowed by the handlers instead of mapped to response bodies.

use thiserror::Error;

/// Errors surfaced by the repository layer.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_wraps_db_error() {
        let err: RepositoryError =
            sea_orm::DbErr::Custom("connection reset".to_string()).into();

        assert!(err.to_string().contains("connection reset"));
    }
}
