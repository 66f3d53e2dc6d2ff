//! Account management for admins: generic users and barbers.
//!
//! Barber routes are the same operations pinned to `Role::Barber`; an
//! account with another role is reported as not found on those routes.

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::ProfileFieldError;
use crate::domain::account::errors::RoleError;
use crate::domain::account::models::optional_text;
use crate::domain::account::models::AccountFilter;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::Role;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::barbershop::errors::BarbershopIdError;
use crate::domain::barbershop::models::BarbershopId;
use crate::inbound::http::router::AppState;

const MAX_PHONE_LENGTH: usize = 20;
const MAX_URL_LENGTH: usize = 255;

pub async fn create_user(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    create(state, body, None).await
}

pub async fn list_users(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    list(state, AccountFilter::default()).await
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    get(state, &id, None).await
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    update(state, &id, body, None).await
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    delete(state, &id, None).await
}

pub async fn create_barber(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    create(state, body, Some(Role::Barber)).await
}

pub async fn list_barbers(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let filter = AccountFilter {
        role: Some(Role::Barber),
        barbershop_id: None,
    };
    list(state, filter).await
}

pub async fn get_barber(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    get(state, &id, Some(Role::Barber)).await
}

pub async fn update_barber(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateAccountRequest>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    update(state, &id, body, Some(Role::Barber)).await
}

pub async fn delete_barber(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    delete(state, &id, Some(Role::Barber)).await
}

pub async fn list_barbershop_barbers(
    State(state): State<AppState>,
    Path(barbershop_id): Path<String>,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    let barbershop_id =
        BarbershopId::from_string(&barbershop_id).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    let filter = AccountFilter {
        role: Some(Role::Barber),
        barbershop_id: Some(barbershop_id),
    };
    list(state, filter).await
}

async fn create(
    state: AppState,
    body: CreateAccountRequest,
    fixed_role: Option<Role>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    state
        .account_service
        .create_account(body.try_into_command(fixed_role)?)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::CREATED, account.into()))
}

async fn list(
    state: AppState,
    filter: AccountFilter,
) -> Result<ApiSuccess<Vec<AccountData>>, ApiError> {
    state
        .account_service
        .list_accounts(filter)
        .await
        .map_err(ApiError::from)
        .map(|accounts| {
            ApiSuccess::new(
                StatusCode::OK,
                accounts.iter().map(AccountData::from).collect(),
            )
        })
}

async fn get(
    state: AppState,
    id: &str,
    expected_role: Option<Role>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = parse_account_id(id)?;

    state
        .account_service
        .get_account(&account_id, expected_role)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

async fn update(
    state: AppState,
    id: &str,
    body: UpdateAccountRequest,
    expected_role: Option<Role>,
) -> Result<ApiSuccess<AccountData>, ApiError> {
    let account_id = parse_account_id(id)?;

    state
        .account_service
        .update_account(&account_id, body.try_into_command()?, expected_role)
        .await
        .map_err(ApiError::from)
        .map(|ref account| ApiSuccess::new(StatusCode::OK, account.into()))
}

async fn delete(
    state: AppState,
    id: &str,
    expected_role: Option<Role>,
) -> Result<ApiSuccess<()>, ApiError> {
    let account_id = parse_account_id(id)?;

    state
        .account_service
        .delete_account(&account_id, expected_role)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

fn parse_account_id(id: &str) -> Result<AccountId, ApiError> {
    AccountId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// HTTP request body for creating an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateAccountRequest {
    email: String,
    password: String,
    name: String,
    phone_number: Option<String>,
    avatar_url: Option<String>,
    role: Option<String>,
    barbershop_id: Option<String>,
}

/// HTTP request body for a partial account update (raw JSON)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateAccountRequest {
    email: Option<String>,
    password: Option<String>,
    name: Option<String>,
    phone_number: Option<String>,
    avatar_url: Option<String>,
    barbershop_id: Option<String>,
    is_active: Option<bool>,
}

#[derive(Debug, Clone, Error)]
enum ParseAccountRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid password: {0}")]
    Password(#[from] PasswordPolicyError),

    #[error("Invalid field: {0}")]
    Field(#[from] ProfileFieldError),

    #[error("Invalid barbershop ID: {0}")]
    BarbershopId(#[from] BarbershopIdError),

    #[error("Invalid role: {0}")]
    Role(#[from] RoleError),
}

impl CreateAccountRequest {
    /// `fixed_role` wins over the submitted role; without either the account
    /// is a plain `User`.
    fn try_into_command(
        self,
        fixed_role: Option<Role>,
    ) -> Result<CreateAccountCommand, ParseAccountRequestError> {
        let role = match (fixed_role, self.role.as_deref().map(str::trim)) {
            (Some(role), _) => role,
            (None, Some(name)) if !name.is_empty() => name.parse()?,
            (None, _) => Role::User,
        };

        Ok(CreateAccountCommand {
            email: EmailAddress::new(self.email)?,
            password: Password::new(self.password)?,
            name: DisplayName::new(self.name)?,
            phone_number: optional_text("phone_number", self.phone_number, MAX_PHONE_LENGTH)?,
            avatar_url: optional_text("avatar_url", self.avatar_url, MAX_URL_LENGTH)?,
            role,
            barbershop_id: self
                .barbershop_id
                .as_deref()
                .map(BarbershopId::from_string)
                .transpose()?,
        })
    }
}

impl UpdateAccountRequest {
    fn try_into_command(self) -> Result<UpdateAccountCommand, ParseAccountRequestError> {
        Ok(UpdateAccountCommand {
            email: self.email.map(EmailAddress::new).transpose()?,
            password: self.password.map(Password::new).transpose()?,
            name: self.name.map(DisplayName::new).transpose()?,
            phone_number: optional_text("phone_number", self.phone_number, MAX_PHONE_LENGTH)?,
            avatar_url: optional_text("avatar_url", self.avatar_url, MAX_URL_LENGTH)?,
            barbershop_id: self
                .barbershop_id
                .as_deref()
                .map(BarbershopId::from_string)
                .transpose()?,
            is_active: self.is_active,
        })
    }
}

impl From<ParseAccountRequestError> for ApiError {
    fn from(err: ParseAccountRequestError) -> Self {
        match err {
            ParseAccountRequestError::Role(_) => ApiError::BadRequest(err.to_string()),
            _ => ApiError::UnprocessableEntity(err.to_string()),
        }
    }
}
