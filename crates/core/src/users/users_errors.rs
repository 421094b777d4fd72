use thiserror::Error;

/// Custom error type for user and authentication operations
#[derive(Debug, Error)]
pub enum UserError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
    /// Covers both an unknown username and a wrong password; callers cannot
    /// tell the two apart.
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
}

impl From<UserError> for String {
    fn from(error: UserError) -> Self {
        error.to_string()
    }
}
