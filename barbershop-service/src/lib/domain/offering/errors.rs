use thiserror::Error;

use crate::domain::account::errors::ProfileFieldError;

/// Error for OfferingId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OfferingIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for catalog service operations
#[derive(Debug, Clone, Error)]
pub enum OfferingError {
    #[error("Invalid service ID: {0}")]
    InvalidOfferingId(#[from] OfferingIdError),

    #[error("Invalid field: {0}")]
    InvalidField(#[from] ProfileFieldError),

    #[error("Price must not be negative, got {0}")]
    NegativePrice(i64),

    #[error("Duration must be at least 1 minute, got {0}")]
    InvalidDuration(i32),

    #[error("Service not found: {0}")]
    NotFound(String),

    #[error("Barbershop not found: {0}")]
    BarbershopNotFound(String),

    #[error("Not allowed to manage services of barbershop {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
