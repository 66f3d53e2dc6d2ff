use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::accounts;
use super::handlers::auth;
use super::handlers::barbershops;
use super::handlers::clients;
use super::handlers::dashboard;
use super::handlers::health::health;
use super::handlers::offerings;
use super::middleware::enforce_policy;
use super::middleware::PolicyGate;
use crate::domain::account::ports::AccountServicePort;
use crate::domain::auth::models::AccessPolicy;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::barbershop::ports::BarbershopServicePort;
use crate::domain::client::ports::ClientServicePort;
use crate::domain::dashboard::ports::DashboardServicePort;
use crate::domain::offering::ports::OfferingServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub account_service: Arc<dyn AccountServicePort>,
    pub barbershop_service: Arc<dyn BarbershopServicePort>,
    pub client_service: Arc<dyn ClientServicePort>,
    pub offering_service: Arc<dyn OfferingServicePort>,
    pub dashboard_service: Arc<dyn DashboardServicePort>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health))
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/barbershops/register", post(barbershops::register_barbershop))
        .route("/api/services", get(offerings::list_offerings))
        .route(
            "/api/services/barbershop/:barbershop_id",
            get(offerings::list_barbershop_offerings),
        )
        .route("/api/services/:id", get(offerings::get_offering));

    let authenticated_routes = Router::new()
        .route("/api/auth/profile", get(auth::profile))
        .route("/api/barbershops", get(barbershops::list_barbershops))
        .route(
            "/api/barbershops/:id",
            get(barbershops::get_barbershop)
                .patch(barbershops::update_barbershop)
                .delete(barbershops::delete_barbershop),
        )
        .route(
            "/api/barbershops/:id/barbers",
            get(accounts::list_barbershop_barbers),
        );

    let admin_routes = Router::new()
        .route(
            "/api/users",
            post(accounts::create_user).get(accounts::list_users),
        )
        .route(
            "/api/users/:id",
            get(accounts::get_user)
                .patch(accounts::update_user)
                .delete(accounts::delete_user),
        )
        .route("/api/barbers", post(accounts::create_barber))
        .route(
            "/api/barbers/:id",
            patch(accounts::update_barber).delete(accounts::delete_barber),
        )
        .route("/api/barbershops", post(barbershops::create_barbershop));

    let admin_or_barber_routes = Router::new()
        .route("/api/barbers", get(accounts::list_barbers))
        .route("/api/barbers/:id", get(accounts::get_barber));

    let staff_routes = Router::new()
        .route(
            "/api/clients",
            post(clients::create_client).get(clients::list_clients),
        )
        .route(
            "/api/clients/:id",
            get(clients::get_client)
                .patch(clients::update_client)
                .delete(clients::delete_client),
        )
        .route(
            "/api/clients/search/phone/:phone",
            get(clients::find_client_by_phone),
        )
        .route(
            "/api/clients/search/email/:email",
            get(clients::find_client_by_email),
        )
        .route("/api/services", post(offerings::create_offering))
        .route(
            "/api/services/:id",
            patch(offerings::update_offering).delete(offerings::delete_offering),
        )
        .route(
            "/api/services/:id/toggle-active",
            patch(offerings::toggle_offering),
        )
        .route("/api/dashboard/overview", get(dashboard::overview))
        .route("/api/dashboard/statistics", get(dashboard::statistics))
        .route(
            "/api/dashboard/recent-activity",
            get(dashboard::recent_activity),
        )
        .route("/api/dashboard/quick-actions", get(dashboard::quick_actions));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(guarded(public_routes, &state, AccessPolicy::Public))
        .merge(guarded(authenticated_routes, &state, AccessPolicy::Authenticated))
        .merge(guarded(admin_routes, &state, AccessPolicy::ADMIN))
        .merge(guarded(admin_or_barber_routes, &state, AccessPolicy::ADMIN_OR_BARBER))
        .merge(guarded(staff_routes, &state, AccessPolicy::STAFF))
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Attach `policy` to every route of the group.
fn guarded(
    routes: Router<AppState>,
    state: &AppState,
    policy: AccessPolicy,
) -> Router<AppState> {
    let gate = PolicyGate::new(state.auth_service.clone(), policy);
    routes.route_layer(middleware::from_fn_with_state(gate, enforce_policy))
}
