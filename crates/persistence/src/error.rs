//! Error type surfaced by the `Database` facade and the `DatabaseManager`.
//!
//! Repositories return `sqlx::Error` directly. Everything above them folds
//! failures into [`DatabaseError`] without reclassifying them: a missing row is
//! an `Ok(None)` or `Ok(false)`, never an error.

use shared::password::PasswordError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type DatabaseResult<T> = Result<T, DatabaseError>;
