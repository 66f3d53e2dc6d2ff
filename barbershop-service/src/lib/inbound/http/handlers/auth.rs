use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::ProfileFieldError;
use crate::domain::account::models::optional_text;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::auth::models::Identity;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RegisterCommand;
use crate::inbound::http::router::AppState;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .auth_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::CREATED, profile.into()))
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<ApiSuccess<LoginResponseData>, ApiError> {
    state
        .auth_service
        .login(&body.email, &body.password)
        .await
        .map_err(ApiError::from)
        .map(|ref outcome| ApiSuccess::new(StatusCode::OK, outcome.into()))
}

pub async fn profile(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .auth_service
        .profile(&identity.account_id)
        .await
        .map_err(ApiError::from)
        .map(|ref profile| ApiSuccess::new(StatusCode::OK, profile.into()))
}

/// HTTP request body for self-service registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Error)]
pub(crate) enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid field: {0}")]
    Field(#[from] ProfileFieldError),
}

impl RegisterRequest {
    pub(crate) fn try_into_command(self) -> Result<RegisterCommand, ParseRegisterRequestError> {
        Ok(RegisterCommand {
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            name: DisplayName::new(self.name)?,
            phone_number: optional_text("phone_number", self.phone_number, 20)?,
            role: self.role,
        })
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

/// Credentials are passed through unparsed so that a malformed email fails
/// the same way as an unknown one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub access_token: String,
    pub token_type: String,
    pub user: AccountData,
}

impl From<&LoginOutcome> for LoginResponseData {
    fn from(outcome: &LoginOutcome) -> Self {
        Self {
            access_token: outcome.access_token.clone(),
            token_type: "Bearer".to_string(),
            user: (&outcome.account).into(),
        }
    }
}
