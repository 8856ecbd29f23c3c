use thiserror::Error;

/// Business errors for auth workflows. Collaborator failures are classified
/// into one of these kinds at their origin and keep the kind all the way up;
/// only the transport layer turns a kind into a status code.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("user already exists")]
    UserExists,
    #[error("user not found")]
    UserNotFound,
    #[error("app not found")]
    AppNotFound,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("storage error: {0}")]
    Storage(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) => 1001,
            AuthError::UserExists => 1002,
            AuthError::UserNotFound => 1003,
            AuthError::AppNotFound => 1004,
            AuthError::InvalidCredentials => 1005,
            AuthError::Hash(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Storage(_) => 1200,
        }
    }
}
