use crate::config::ConfigError;
use thiserror::Error;

/// Failures surfaced by the repository and the query layer.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A write referenced a User or Card that does not exist.
    #[error("Referential integrity violation: {0}")]
    ReferentialIntegrity(String),
    #[error("Database error")]
    Database(#[source] sqlx::Error),
    #[error("Failed to encode query parameter")]
    Encode(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_foreign_key_violation() {
                return StoreError::ReferentialIntegrity(db_err.message().to_string());
            }
        }
        StoreError::Database(err)
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("Failed to initialize database")]
    Init(#[source] sqlx::Error),
}
