use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::auth::RegisterRequest;
use super::caller_scope;
use super::AccountData;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::account::models::AccountId;
use crate::domain::auth::models::Identity;
use crate::domain::barbershop::errors::DraftError;
use crate::domain::barbershop::models::Barbershop;
use crate::domain::barbershop::models::BarbershopDraft;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantRegistration;
use crate::domain::barbershop::models::UpdateBarbershopCommand;
use crate::inbound::http::router::AppState;

/// Public sign-up of a barbershop together with its owner account.
pub async fn register_barbershop(
    State(state): State<AppState>,
    Json(body): Json<RegisterBarbershopRequest>,
) -> Result<ApiSuccess<RegistrationResponseData>, ApiError> {
    let owner = body.owner.try_into_command()?;
    let draft = body.barbershop.try_into_draft()?;

    state
        .barbershop_service
        .register_with_owner(owner, draft)
        .await
        .map_err(ApiError::from)
        .map(|ref registration| ApiSuccess::new(StatusCode::CREATED, registration.into()))
}

pub async fn create_barbershop(
    State(state): State<AppState>,
    Json(body): Json<CreateBarbershopRequest>,
) -> Result<ApiSuccess<BarbershopData>, ApiError> {
    let owner_id =
        AccountId::from_string(&body.owner_id).map_err(|e| ApiError::UnprocessableEntity(e.to_string()))?;
    let draft = BarbershopDraft::new(body.name, body.address).map_err(draft_error)?;

    state
        .barbershop_service
        .create_barbershop(draft, owner_id)
        .await
        .map_err(ApiError::from)
        .map(|ref barbershop| ApiSuccess::new(StatusCode::CREATED, barbershop.into()))
}

pub async fn list_barbershops(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<BarbershopData>>, ApiError> {
    state
        .barbershop_service
        .list_barbershops()
        .await
        .map_err(ApiError::from)
        .map(|barbershops| {
            ApiSuccess::new(
                StatusCode::OK,
                barbershops.iter().map(BarbershopData::from).collect(),
            )
        })
}

pub async fn get_barbershop(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<BarbershopData>, ApiError> {
    let barbershop_id = parse_barbershop_id(&id)?;

    state
        .barbershop_service
        .get_barbershop(&barbershop_id)
        .await
        .map_err(ApiError::from)
        .map(|ref barbershop| ApiSuccess::new(StatusCode::OK, barbershop.into()))
}

pub async fn update_barbershop(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateBarbershopRequest>,
) -> Result<ApiSuccess<BarbershopData>, ApiError> {
    let barbershop_id = parse_barbershop_id(&id)?;
    let scope = caller_scope(&identity)?;
    let command = UpdateBarbershopCommand::new(body.name, body.address).map_err(draft_error)?;

    state
        .barbershop_service
        .update_barbershop(&barbershop_id, command, scope)
        .await
        .map_err(ApiError::from)
        .map(|ref barbershop| ApiSuccess::new(StatusCode::OK, barbershop.into()))
}

pub async fn delete_barbershop(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let barbershop_id = parse_barbershop_id(&id)?;
    let scope = caller_scope(&identity)?;

    state
        .barbershop_service
        .delete_barbershop(&barbershop_id, scope)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

fn parse_barbershop_id(id: &str) -> Result<BarbershopId, ApiError> {
    BarbershopId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn draft_error(err: DraftError) -> ApiError {
    ApiError::UnprocessableEntity(err.to_string())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterBarbershopRequest {
    owner: RegisterRequest,
    barbershop: BarbershopDraftRequest,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BarbershopDraftRequest {
    name: String,
    address: String,
}

impl BarbershopDraftRequest {
    fn try_into_draft(self) -> Result<BarbershopDraft, ApiError> {
        BarbershopDraft::new(self.name, self.address).map_err(draft_error)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateBarbershopRequest {
    name: String,
    address: String,
    owner_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateBarbershopRequest {
    name: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarbershopData {
    pub id: String,
    pub name: String,
    pub address: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Barbershop> for BarbershopData {
    fn from(barbershop: &Barbershop) -> Self {
        Self {
            id: barbershop.id.to_string(),
            name: barbershop.name.clone(),
            address: barbershop.address.clone(),
            owner_id: barbershop.owner_id.to_string(),
            created_at: barbershop.created_at,
            updated_at: barbershop.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationResponseData {
    pub owner: AccountData,
    pub barbershop: BarbershopData,
}

impl From<&TenantRegistration> for RegistrationResponseData {
    fn from(registration: &TenantRegistration) -> Self {
        Self {
            owner: (&registration.owner).into(),
            barbershop: (&registration.barbershop).into(),
        }
    }
}
