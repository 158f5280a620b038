//! Error types for gallery storage.

use gallery_core::PaintingId;

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(String),

    /// A foreign-key, check or uniqueness constraint rejected the write.
    #[error("constraint violation: {0}")]
    Constraint(String),

    /// Record not found.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity name, capitalized (`"Painting"`).
        entity: &'static str,
        /// The key that was looked up.
        id: i64,
    },

    /// The painting exists but has already been sold.
    #[error("painting {painting_id} is not available")]
    PaintingUnavailable {
        /// The painting that could not be sold.
        painting_id: PaintingId,
    },
}

impl StoreError {
    /// Shorthand for a missing painting.
    #[must_use]
    pub fn painting_not_found(id: PaintingId) -> Self {
        Self::NotFound {
            entity: "Painting",
            id: id.get(),
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if !matches!(db.kind(), sqlx::error::ErrorKind::Other) => {
                Self::Constraint(db.message().to_string())
            }
            _ => Self::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Database(format!("migration failed: {err}"))
    }
}
