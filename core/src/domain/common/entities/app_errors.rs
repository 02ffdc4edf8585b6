use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Account is banned")]
    Banned,

    #[error("Malformed analysis record: {0}")]
    MalformedRecord(String),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("File too large")]
    FileTooLarge,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("External service timed out")]
    ExternalServiceTimeout,

    #[error("Object storage error: {0}")]
    ObjectStorageError(String),

    #[error("Internal server error")]
    InternalServerError,
}
