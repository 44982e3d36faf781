// Domain error taxonomy and a result type alias, built on thiserror.
use thiserror::Error;

pub mod response;

pub use response::error_envelope;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("username already exist")]
    DuplicateUser,

    #[error("wrong username or password")]
    InvalidCredentials,

    // Missing or invalid bearer token, as opposed to bad login credentials.
    #[error("Unauthorized: {0}")]
    Auth(String),

    #[error("You are not allowed to access this task")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    // The #[from] attribute converts a redis::RedisError into AppError::Redis via the From trait.
    #[error("Database error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Hash error: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
