use thiserror::Error;
use validator::ValidationErrors;

/// Errors that can be returned by qrcodes-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Propagated from the SQLite store.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Applying the schema migrations failed.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    /// Another record already holds this identifier.
    #[error("identifier {0} already exists")]
    DuplicateIdentifier(String),

    /// No record with this primary key.
    #[error("QR code {0} not found")]
    NotFound(i64),

    /// A request failed its field validation rules.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

impl CoreError {
    /// Map a write error to [`CoreError::DuplicateIdentifier`] when the
    /// database rejected it on the `identifier` UNIQUE index.
    pub(crate) fn from_write(err: sqlx::Error, identifier: &str) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                CoreError::DuplicateIdentifier(identifier.to_owned())
            }
            _ => CoreError::Database(err),
        }
    }
}
