use thiserror::Error;

use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::ProfileFieldError;

/// Error for ClientId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ClientIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for client operations
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    #[error("Invalid client ID: {0}")]
    InvalidClientId(#[from] ClientIdError),

    #[error("Invalid field: {0}")]
    InvalidField(#[from] ProfileFieldError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Client not found: {0}")]
    NotFound(String),

    #[error("Barbershop not found: {0}")]
    BarbershopNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
