use thiserror::Error;

use crate::domain::account::errors::ProfileFieldError;
use crate::domain::auth::errors::AuthError;

/// Error for BarbershopId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BarbershopIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for barbershop name/address validation
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error(transparent)]
    InvalidField(#[from] ProfileFieldError),
}

/// Top-level error for barbershop operations
#[derive(Debug, Clone, Error)]
pub enum BarbershopError {
    #[error("Invalid barbershop ID: {0}")]
    InvalidBarbershopId(#[from] BarbershopIdError),

    #[error("Invalid barbershop: {0}")]
    InvalidDraft(#[from] DraftError),

    /// Owner registration rules rejected the request (duplicate email, ...).
    #[error(transparent)]
    Registration(#[from] AuthError),

    #[error("Barbershop not found: {0}")]
    NotFound(String),

    #[error("Not allowed to manage barbershop {0}")]
    Forbidden(String),

    #[error("Owner account not found: {0}")]
    OwnerNotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}
