use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Book not found.")]
    BookNotFound,
    #[error("Review not found.")]
    ReviewNotFound,
    #[error("User not found.")]
    UserNotFound,
    #[error("Username already exists.")]
    AlreadyExists,
    #[error("Invalid credentials.")]
    InvalidCredentials,
    #[error("Unauthorized. Please register or log in.")]
    Unauthorized,
    #[error("{0}")]
    Validation(String),
    #[error("catalog seed error: {0}")]
    Seed(String),
}

impl ServiceError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::BookNotFound => 1001,
            ServiceError::ReviewNotFound => 1002,
            ServiceError::UserNotFound => 1003,
            ServiceError::AlreadyExists => 1101,
            ServiceError::InvalidCredentials => 1102,
            ServiceError::Unauthorized => 1103,
            ServiceError::Validation(_) => 1201,
            ServiceError::Seed(_) => 1301,
        }
    }
}
