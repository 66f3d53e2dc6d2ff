//! Service catalog. Reads are public; writes are limited to the caller's
//! barbershop (admins may manage any).

use axum::extract::Path;
use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::caller_barbershop;
use super::caller_scope;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::Identity;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::offering::models::CreateOfferingCommand;
use crate::domain::offering::models::Offering;
use crate::domain::offering::models::OfferingId;
use crate::domain::offering::models::UpdateOfferingCommand;
use crate::inbound::http::router::AppState;

pub async fn create_offering(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateOfferingRequest>,
) -> Result<ApiSuccess<OfferingData>, ApiError> {
    let scope = caller_scope(&identity)?;
    let barbershop_id = match body.barbershop_id.as_deref() {
        Some(id) => parse_barbershop_id(id)?,
        None => caller_barbershop(&identity)?,
    };
    let command = CreateOfferingCommand::new(
        barbershop_id,
        body.name,
        body.description,
        body.price_cents,
        body.duration_minutes,
        body.active,
        body.image_url,
    )?;

    state
        .offering_service
        .create_offering(command, scope)
        .await
        .map_err(ApiError::from)
        .map(|ref offering| ApiSuccess::new(StatusCode::CREATED, offering.into()))
}

pub async fn list_offerings(
    State(state): State<AppState>,
    Query(query): Query<ListOfferingsQuery>,
) -> Result<ApiSuccess<Vec<OfferingData>>, ApiError> {
    let barbershop_id = query
        .barbershop_id
        .as_deref()
        .map(parse_barbershop_id)
        .transpose()?;

    list(state, barbershop_id).await
}

pub async fn list_barbershop_offerings(
    State(state): State<AppState>,
    Path(barbershop_id): Path<String>,
) -> Result<ApiSuccess<Vec<OfferingData>>, ApiError> {
    let barbershop_id = parse_barbershop_id(&barbershop_id)?;
    list(state, Some(barbershop_id)).await
}

pub async fn get_offering(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<OfferingData>, ApiError> {
    let offering_id = parse_offering_id(&id)?;

    state
        .offering_service
        .get_offering(&offering_id)
        .await
        .map_err(ApiError::from)
        .map(|ref offering| ApiSuccess::new(StatusCode::OK, offering.into()))
}

pub async fn update_offering(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOfferingRequest>,
) -> Result<ApiSuccess<OfferingData>, ApiError> {
    let offering_id = parse_offering_id(&id)?;
    let scope = caller_scope(&identity)?;
    let command = UpdateOfferingCommand::new(
        body.name,
        body.description,
        body.price_cents,
        body.duration_minutes,
        body.active,
        body.image_url,
    )?;

    state
        .offering_service
        .update_offering(&offering_id, command, scope)
        .await
        .map_err(ApiError::from)
        .map(|ref offering| ApiSuccess::new(StatusCode::OK, offering.into()))
}

pub async fn toggle_offering(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<OfferingData>, ApiError> {
    let offering_id = parse_offering_id(&id)?;
    let scope = caller_scope(&identity)?;

    state
        .offering_service
        .toggle_active(&offering_id, scope)
        .await
        .map_err(ApiError::from)
        .map(|ref offering| ApiSuccess::new(StatusCode::OK, offering.into()))
}

pub async fn delete_offering(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let offering_id = parse_offering_id(&id)?;
    let scope = caller_scope(&identity)?;

    state
        .offering_service
        .delete_offering(&offering_id, scope)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

async fn list(
    state: AppState,
    barbershop_id: Option<BarbershopId>,
) -> Result<ApiSuccess<Vec<OfferingData>>, ApiError> {
    state
        .offering_service
        .list_offerings(barbershop_id)
        .await
        .map_err(ApiError::from)
        .map(|offerings| {
            ApiSuccess::new(
                StatusCode::OK,
                offerings.iter().map(OfferingData::from).collect(),
            )
        })
}

fn parse_offering_id(id: &str) -> Result<OfferingId, ApiError> {
    OfferingId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

fn parse_barbershop_id(id: &str) -> Result<BarbershopId, ApiError> {
    BarbershopId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ListOfferingsQuery {
    barbershop_id: Option<String>,
}

/// HTTP request body for a new catalog entry (raw JSON)
///
/// `barbershop_id` defaults to the caller's own barbershop.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateOfferingRequest {
    barbershop_id: Option<String>,
    name: String,
    description: Option<String>,
    price_cents: i64,
    duration_minutes: i32,
    active: Option<bool>,
    image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateOfferingRequest {
    name: Option<String>,
    description: Option<String>,
    price_cents: Option<i64>,
    duration_minutes: Option<i32>,
    active: Option<bool>,
    image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferingData {
    pub id: String,
    pub barbershop_id: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Offering> for OfferingData {
    fn from(offering: &Offering) -> Self {
        Self {
            id: offering.id.to_string(),
            barbershop_id: offering.barbershop_id.to_string(),
            name: offering.name.clone(),
            description: offering.description.clone(),
            price_cents: offering.price_cents,
            duration_minutes: offering.duration_minutes,
            active: offering.active,
            image_url: offering.image_url.clone(),
            created_at: offering.created_at,
            updated_at: offering.updated_at,
        }
    }
}
