use std::fmt::Display;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountProfile;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::barbershop::errors::BarbershopError;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantScope;
use crate::domain::client::errors::ClientError;
use crate::domain::dashboard::errors::DashboardError;
use crate::domain::offering::errors::OfferingError;

pub mod accounts;
pub mod auth;
pub mod barbershops;
pub mod clients;
pub mod dashboard;
pub mod health;
pub mod offerings;

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Unauthorized(String),
    Forbidden(String),
}

impl ApiError {
    /// Log the cause and hide it from the client.
    pub fn internal(cause: impl Display) -> Self {
        tracing::error!(error = %cause, "Request failed with a server fault");
        ApiError::InternalServerError("Internal server error".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail(_) | AuthError::InvalidPassword(_) | AuthError::InvalidField(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            AuthError::DuplicateEmail(_) => {
                ApiError::Conflict("Email is already registered".to_string())
            }
            AuthError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            AuthError::InvalidCredentials => {
                ApiError::Unauthorized("Invalid credentials".to_string())
            }
            AuthError::Unauthorized(_) => ApiError::Unauthorized("Unauthorized".to_string()),
            AuthError::TokenExpired => ApiError::Unauthorized("Token expired".to_string()),
            AuthError::TokenInvalid(_) => ApiError::Unauthorized("Invalid token".to_string()),
            AuthError::Forbidden { .. } => {
                ApiError::Forbidden("Insufficient permissions".to_string())
            }
            AuthError::CredentialFormat(_) | AuthError::DatabaseError(_) | AuthError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidAccountId(_)
            | AccountError::InvalidEmail(_)
            | AccountError::InvalidField(_)
            | AccountError::InvalidPassword(_) => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::InvalidRole(_) => ApiError::BadRequest(err.to_string()),
            AccountError::NotFound(_) | AccountError::BarbershopNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            AccountError::EmailAlreadyExists(_) => {
                ApiError::Conflict("Email is already registered".to_string())
            }
            AccountError::StillOwnsBarbershop(_) => ApiError::Conflict(err.to_string()),
            AccountError::Hashing(_) | AccountError::DatabaseError(_) | AccountError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<BarbershopError> for ApiError {
    fn from(err: BarbershopError) -> Self {
        match err {
            BarbershopError::Registration(auth_err) => auth_err.into(),
            BarbershopError::InvalidBarbershopId(_) | BarbershopError::InvalidDraft(_) => {
                ApiError::UnprocessableEntity(err.to_string())
            }
            BarbershopError::NotFound(_) | BarbershopError::OwnerNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            BarbershopError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            BarbershopError::DatabaseError(_) | BarbershopError::Unknown(_) => {
                ApiError::internal(err)
            }
        }
    }
}

impl From<ClientError> for ApiError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::InvalidClientId(_)
            | ClientError::InvalidField(_)
            | ClientError::InvalidEmail(_) => ApiError::UnprocessableEntity(err.to_string()),
            ClientError::NotFound(_) | ClientError::BarbershopNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            ClientError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<OfferingError> for ApiError {
    fn from(err: OfferingError) -> Self {
        match err {
            OfferingError::InvalidOfferingId(_)
            | OfferingError::InvalidField(_)
            | OfferingError::NegativePrice(_)
            | OfferingError::InvalidDuration(_) => ApiError::UnprocessableEntity(err.to_string()),
            OfferingError::NotFound(_) | OfferingError::BarbershopNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            OfferingError::Forbidden(_) => ApiError::Forbidden(err.to_string()),
            OfferingError::DatabaseError(_) => ApiError::internal(err),
        }
    }
}

impl From<DashboardError> for ApiError {
    fn from(err: DashboardError) -> Self {
        ApiError::internal(err)
    }
}

/// The barbershop a tenant-scoped request operates on.
pub fn caller_barbershop(identity: &Identity) -> Result<BarbershopId, ApiError> {
    identity
        .barbershop_id
        .ok_or_else(|| ApiError::Forbidden("Account is not linked to a barbershop".to_string()))
}

pub fn caller_scope(identity: &Identity) -> Result<TenantScope, ApiError> {
    identity
        .tenant_scope()
        .ok_or_else(|| ApiError::Forbidden("Account is not linked to a barbershop".to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

/// Account as returned by every endpoint; never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountData {
    pub id: String,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub role: String,
    pub role_id: i16,
    pub barbershop_id: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&AccountProfile> for AccountData {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            email: profile.email.clone(),
            name: profile.name.clone(),
            phone_number: profile.phone_number.clone(),
            avatar_url: profile.avatar_url.clone(),
            role: profile.role.to_string(),
            role_id: profile.role.id(),
            barbershop_id: profile.barbershop_id.map(|id| id.to_string()),
            is_active: profile.is_active,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        (&AccountProfile::from(account)).into()
    }
}
