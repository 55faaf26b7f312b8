//! Error types for worldinfo.

use thiserror::Error;

/// Common error type for worldinfo.
#[derive(Error, Debug)]
pub enum WorldError {
    /// Database error.
    ///
    /// Errors from sqlx are converted into this variant, except unique
    /// constraint violations which become [`WorldError::Conflict`].
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A uniqueness constraint was violated.
    #[error("{0} already exists")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Session store error.
    #[error("session store error: {0}")]
    Session(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for WorldError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return WorldError::Conflict(db_err.message().to_string());
            }
        }
        WorldError::Database(e.to_string())
    }
}

/// Result type alias for worldinfo operations.
pub type Result<T> = std::result::Result<T, WorldError>;
