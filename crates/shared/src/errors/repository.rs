use sqlx::Error as SqlxError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Sqlx(#[from] SqlxError),

    #[error("Not found")]
    NotFound,

    #[error("Nothing deleted: no product with id {0}")]
    NothingDeleted(i32),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Foreign key violation: {0}")]
    ForeignKey(String),

    #[error("Failed to begin transaction: {0}")]
    BeginTransaction(#[source] SqlxError),

    #[error("Failed to create product: {0}")]
    CreateProduct(#[source] SqlxError),

    #[error("Failed to attach workshop {workshop_id}: {source}")]
    AttachWorkshop {
        workshop_id: i32,
        #[source]
        source: SqlxError,
    },

    #[error("Failed to commit transaction: {0}")]
    Commit(#[source] SqlxError),
}

impl RepositoryError {
    /// Splits constraint violations out of a raw driver error, keeping the
    /// engine's message.
    pub fn classify(err: SqlxError) -> Self {
        if let Some(db_err) = err.as_database_error() {
            if db_err.is_foreign_key_violation() {
                return Self::ForeignKey(db_err.message().to_string());
            }
            if db_err.is_unique_violation() {
                return Self::AlreadyExists(db_err.message().to_string());
            }
        }
        Self::Sqlx(err)
    }

    pub fn is_transactional(&self) -> bool {
        matches!(
            self,
            Self::BeginTransaction(_)
                | Self::CreateProduct(_)
                | Self::AttachWorkshop { .. }
                | Self::Commit(_)
        )
    }
}
