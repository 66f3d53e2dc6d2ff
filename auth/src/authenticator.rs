use std::sync::OnceLock;

use chrono::Duration;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;
use crate::password::PasswordError;
use crate::password::PasswordHasher;

/// Authentication coordinator combining password verification and token issuance.
pub struct Authenticator {
    password_hasher: PasswordHasher,
    jwt_handler: JwtHandler,
    /// Hash checked when no stored hash exists, built on first use.
    decoy_hash: OnceLock<Option<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-never-issued";

/// Result of successful authentication.
#[derive(Debug, Clone)]
pub struct AuthenticationResult {
    /// JWT access token
    pub access_token: String,
}

/// Identity to embed in an issued token.
#[derive(Debug, Clone, Copy)]
pub struct TokenSubject<'a> {
    pub id: &'a str,
    pub email: &'a str,
    pub role_id: i16,
}

/// Authentication operation errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthenticationError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Password error: {0}")]
    PasswordError(#[from] PasswordError),

    #[error("JWT error: {0}")]
    JwtError(#[from] JwtError),
}

impl Authenticator {
    /// Create a new authenticator with the default hashing cost.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for JWT signing
    /// * `token_ttl` - Lifetime of issued access tokens
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        Self {
            password_hasher: PasswordHasher::new(),
            jwt_handler: JwtHandler::new(jwt_secret, token_ttl),
            decoy_hash: OnceLock::new(),
        }
    }

    /// Replace the password hasher (e.g. one built with a custom work factor).
    pub fn with_password_hasher(mut self, password_hasher: PasswordHasher) -> Self {
        self.password_hasher = password_hasher;
        self.decoy_hash = OnceLock::new();
        self
    }

    pub fn token_ttl(&self) -> Duration {
        self.jwt_handler.ttl()
    }

    /// Hash a password for storage.
    ///
    /// # Errors
    /// * `PasswordError` - Empty password or hashing failure
    pub fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash(password)
    }

    /// Verify credentials and issue a token for `subject`.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Password does not match
    /// * `PasswordError` - Stored hash is malformed
    /// * `JwtError` - Token generation failed
    pub fn authenticate(
        &self,
        password: &str,
        stored_hash: &str,
        subject: TokenSubject<'_>,
    ) -> Result<AuthenticationResult, AuthenticationError> {
        let is_valid = self.password_hasher.verify(password, stored_hash)?;

        if !is_valid {
            return Err(AuthenticationError::InvalidCredentials);
        }

        let access_token = self.generate_token(subject)?;

        Ok(AuthenticationResult { access_token })
    }

    /// Fail a login for which no stored hash exists.
    ///
    /// Runs one verification against a decoy hash of the same work factor,
    /// so an unknown account costs as much as a wrong password.
    pub fn reject_unknown(&self, password: &str) -> AuthenticationError {
        let decoy = self
            .decoy_hash
            .get_or_init(|| self.password_hasher.hash(DECOY_PASSWORD).ok());

        if let Some(hash) = decoy {
            let _ = self.password_hasher.verify(password, hash);
        }

        AuthenticationError::InvalidCredentials
    }

    /// Issue a token without password verification.
    pub fn generate_token(&self, subject: TokenSubject<'_>) -> Result<String, JwtError> {
        self.jwt_handler
            .issue(subject.id, subject.email, subject.role_id)
    }

    /// Validate and decode a token.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `InvalidToken` - Signature or structure is invalid
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.jwt_handler.verify(token)
    }
}
