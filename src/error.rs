//! Error types for the Stride backend
//!
//! All errors use thiserror for structured error handling.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Notification permission not granted")]
    PermissionDenied,

    #[error("Notification error: {0}")]
    Notification(String),

    #[error("Notification registration timed out")]
    RegistrationTimeout,

    #[error("{0}")]
    Generic(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
