//! Client records, always scoped to the caller's barbershop.

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::caller_barbershop;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::Identity;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::UpdateClientCommand;
use crate::inbound::http::router::AppState;

pub async fn create_client(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Json(body): Json<CreateClientRequest>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;
    let command = CreateClientCommand::new(
        body.name,
        body.lastname,
        body.phone,
        body.email,
        body.notes,
    )?;

    state
        .client_service
        .create_client(barbershop_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::CREATED, client.into()))
}

pub async fn list_clients(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<Vec<ClientData>>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;

    state
        .client_service
        .list_clients(barbershop_id)
        .await
        .map_err(ApiError::from)
        .map(|clients| ApiSuccess::new(StatusCode::OK, clients.iter().map(ClientData::from).collect()))
}

pub async fn get_client(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;
    let client_id = parse_client_id(&id)?;

    state
        .client_service
        .get_client(barbershop_id, &client_id)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}

pub async fn update_client(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
    Json(body): Json<UpdateClientRequest>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;
    let client_id = parse_client_id(&id)?;
    let command = UpdateClientCommand::new(
        body.name,
        body.lastname,
        body.phone,
        body.email,
        body.notes,
    )?;

    state
        .client_service
        .update_client(barbershop_id, &client_id, command)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}

pub async fn delete_client(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(id): Path<String>,
) -> Result<ApiSuccess<()>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;
    let client_id = parse_client_id(&id)?;

    state
        .client_service
        .delete_client(barbershop_id, &client_id)
        .await
        .map_err(ApiError::from)
        .map(|_| ApiSuccess::new(StatusCode::NO_CONTENT, ()))
}

pub async fn find_client_by_phone(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(phone): Path<String>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;

    state
        .client_service
        .find_by_phone(barbershop_id, &phone)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}

pub async fn find_client_by_email(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Path(email): Path<String>,
) -> Result<ApiSuccess<ClientData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;

    state
        .client_service
        .find_by_email(barbershop_id, &email)
        .await
        .map_err(ApiError::from)
        .map(|ref client| ApiSuccess::new(StatusCode::OK, client.into()))
}

fn parse_client_id(id: &str) -> Result<ClientId, ApiError> {
    ClientId::from_string(id).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// HTTP request body for creating a client (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateClientRequest {
    name: String,
    lastname: String,
    phone: String,
    email: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UpdateClientRequest {
    name: Option<String>,
    lastname: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientData {
    pub id: String,
    pub barbershop_id: String,
    pub name: String,
    pub lastname: String,
    pub phone: String,
    pub email: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Client> for ClientData {
    fn from(client: &Client) -> Self {
        Self {
            id: client.id.to_string(),
            barbershop_id: client.barbershop_id.to_string(),
            name: client.name.clone(),
            lastname: client.lastname.clone(),
            phone: client.phone.clone(),
            email: client.email.as_ref().map(|e| e.as_str().to_string()),
            notes: client.notes.clone(),
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}
