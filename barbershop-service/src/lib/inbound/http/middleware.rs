use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::header;
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::auth::models::AccessPolicy;
use crate::domain::auth::ports::AuthServicePort;
use crate::inbound::http::handlers::ApiError;

/// State of the access-control middleware for one group of routes.
#[derive(Clone)]
pub struct PolicyGate {
    auth_service: Arc<dyn AuthServicePort>,
    policy: AccessPolicy,
}

impl PolicyGate {
    pub fn new(auth_service: Arc<dyn AuthServicePort>, policy: AccessPolicy) -> Self {
        Self {
            auth_service,
            policy,
        }
    }
}

/// Resolve the caller from the bearer token, check the group's policy and
/// attach the resulting `Identity` to the request extensions.
pub async fn enforce_policy(
    State(gate): State<PolicyGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !gate.policy.requires_identity() {
        return Ok(next.run(req).await);
    }

    let token = extract_bearer_token(&req)?.to_owned();

    let identity = gate
        .auth_service
        .resolve_identity(&token)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, "Bearer token rejected");
            ApiError::from(e)
        })?;

    if let Some(allowed) = gate.policy.allowed_roles() {
        gate.auth_service
            .authorize(&identity, allowed)
            .map_err(|e| {
                tracing::warn!(
                    account_id = %identity.account_id,
                    role = %identity.role,
                    uri = %req.uri(),
                    "Role not allowed"
                );
                ApiError::from(e)
            })?;
    }

    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

fn extract_bearer_token(req: &Request) -> Result<&str, ApiError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| ApiError::Unauthorized("Missing Authorization header".to_string()))?;

    let value = header_value
        .to_str()
        .map_err(|_| ApiError::Unauthorized("Invalid Authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized(
                "Invalid Authorization header format. Expected: Bearer <token>".to_string(),
            )
        })
}
