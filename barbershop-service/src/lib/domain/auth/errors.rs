use thiserror::Error;

use crate::domain::account::errors::AccountError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::ProfileFieldError;
use crate::domain::account::models::Role;

/// Errors of registration, login and request authentication.
///
/// Every variant is terminal for the request that produced it.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Invalid password: {0}")]
    InvalidPassword(#[from] PasswordPolicyError),

    #[error("Invalid field: {0}")]
    InvalidField(#[from] ProfileFieldError),

    #[error("Email already registered: {0}")]
    DuplicateEmail(String),

    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// Unknown email, wrong password or inactive account.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Token was valid but the account no longer resolves.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Role {role} is not allowed to perform this action")]
    Forbidden { role: Role },

    /// Stored password hash could not be parsed.
    #[error("Stored credential is malformed: {0}")]
    CredentialFormat(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    TokenInvalid(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<AccountError> for AuthError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::EmailAlreadyExists(email) => AuthError::DuplicateEmail(email),
            AccountError::InvalidEmail(e) => AuthError::InvalidEmail(e),
            AccountError::InvalidRole(e) => AuthError::InvalidRole(e.to_string()),
            AccountError::InvalidField(e) => AuthError::InvalidField(e),
            AccountError::InvalidPassword(e) => AuthError::InvalidPassword(e),
            AccountError::DatabaseError(e) => AuthError::DatabaseError(e),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}

impl From<auth::JwtError> for AuthError {
    fn from(err: auth::JwtError) -> Self {
        match err {
            auth::JwtError::TokenExpired => AuthError::TokenExpired,
            auth::JwtError::InvalidToken(e) => AuthError::TokenInvalid(e),
            auth::JwtError::EncodingFailed(e) => AuthError::Unknown(e),
        }
    }
}

impl From<auth::PasswordError> for AuthError {
    fn from(err: auth::PasswordError) -> Self {
        match err {
            auth::PasswordError::MalformedHash(e) => AuthError::CredentialFormat(e),
            other => AuthError::Unknown(other.to_string()),
        }
    }
}

impl From<auth::AuthenticationError> for AuthError {
    fn from(err: auth::AuthenticationError) -> Self {
        match err {
            auth::AuthenticationError::InvalidCredentials => AuthError::InvalidCredentials,
            auth::AuthenticationError::PasswordError(e) => e.into(),
            auth::AuthenticationError::JwtError(e) => e.into(),
        }
    }
}
