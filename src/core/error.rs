use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// The write would break a data invariant (e.g. a negative vote count)
    #[error("Constraint violation: {0}")]
    Constraint(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Classify a database error raised while `action` was running.
    ///
    /// Foreign key violations surface as `Validation` (the referenced row is
    /// missing), check violations as `Constraint`. Anything else is logged and
    /// kept as `Database`.
    pub fn from_db(action: &str, e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_foreign_key_violation() {
                tracing::warn!("{} rejected by foreign key: {}", action, db_err.message());
                return AppError::Validation(format!(
                    "Referenced record does not exist ({})",
                    db_err.constraint().unwrap_or("foreign key")
                ));
            }
            if db_err.is_check_violation() {
                tracing::warn!("{} rejected by check: {}", action, db_err.message());
                return AppError::Constraint(format!(
                    "Value violates {}",
                    db_err.constraint().unwrap_or("a check constraint")
                ));
            }
        }

        tracing::error!("Failed to {}: {:?}", action, e);
        AppError::Database(e)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
