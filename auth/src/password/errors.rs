use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Password must not be empty")]
    Empty,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// The stored hash could not be parsed. Indicates corrupted credential data.
    #[error("Malformed password hash: {0}")]
    MalformedHash(String),

    #[error("Invalid hashing cost: {0}")]
    InvalidCost(String),
}
