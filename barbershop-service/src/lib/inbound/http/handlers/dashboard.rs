use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use super::caller_barbershop;
use super::ApiError;
use super::ApiSuccess;
use crate::domain::auth::models::Identity;
use crate::domain::dashboard::models::ActivityLimit;
use crate::domain::dashboard::models::Overview;
use crate::domain::dashboard::models::QuickActions;
use crate::domain::dashboard::models::RecentActivity;
use crate::domain::dashboard::models::Statistics;
use crate::domain::dashboard::models::StatisticsPeriod;
use crate::inbound::http::router::AppState;

pub async fn overview(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<OverviewData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;

    state
        .dashboard_service
        .overview(barbershop_id)
        .await
        .map_err(ApiError::from)
        .map(|ref overview| ApiSuccess::new(StatusCode::OK, overview.into()))
}

pub async fn statistics(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<StatisticsQuery>,
) -> Result<ApiSuccess<StatisticsData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;
    let period = StatisticsPeriod::parse_lenient(query.period.as_deref());

    state
        .dashboard_service
        .statistics(barbershop_id, period)
        .await
        .map_err(ApiError::from)
        .map(|ref statistics| ApiSuccess::new(StatusCode::OK, statistics.into()))
}

pub async fn recent_activity(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
    Query(query): Query<RecentActivityQuery>,
) -> Result<ApiSuccess<RecentActivityData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;

    state
        .dashboard_service
        .recent_activity(barbershop_id, ActivityLimit::new(query.limit))
        .await
        .map_err(ApiError::from)
        .map(|ref activity| ApiSuccess::new(StatusCode::OK, activity.into()))
}

pub async fn quick_actions(
    State(state): State<AppState>,
    Extension(identity): Extension<Identity>,
) -> Result<ApiSuccess<QuickActionsData>, ApiError> {
    let barbershop_id = caller_barbershop(&identity)?;

    state
        .dashboard_service
        .quick_actions(barbershop_id)
        .await
        .map_err(ApiError::from)
        .map(|ref actions| ApiSuccess::new(StatusCode::OK, actions.into()))
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StatisticsQuery {
    period: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecentActivityQuery {
    limit: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverviewData {
    pub total_clients: i64,
    pub total_services: i64,
    pub total_barbers: i64,
}

impl From<&Overview> for OverviewData {
    fn from(overview: &Overview) -> Self {
        Self {
            total_clients: overview.total_clients,
            total_services: overview.total_services,
            total_barbers: overview.total_barbers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsData {
    pub period: String,
    pub since: DateTime<Utc>,
    pub new_clients: i64,
}

impl From<&Statistics> for StatisticsData {
    fn from(statistics: &Statistics) -> Self {
        Self {
            period: statistics.period.to_string(),
            since: statistics.since,
            new_clients: statistics.new_clients,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentClientData {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecentActivityData {
    pub recent_clients: Vec<RecentClientData>,
}

impl From<&RecentActivity> for RecentActivityData {
    fn from(activity: &RecentActivity) -> Self {
        Self {
            recent_clients: activity
                .recent_clients
                .iter()
                .map(|client| RecentClientData {
                    id: client.id.to_string(),
                    name: client.name.clone(),
                    lastname: client.lastname.clone(),
                    created_at: client.created_at,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummaryData {
    pub id: String,
    pub name: String,
    pub price_cents: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BarberSummaryData {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuickActionsData {
    pub active_services: Vec<ServiceSummaryData>,
    pub available_barbers: Vec<BarberSummaryData>,
}

impl From<&QuickActions> for QuickActionsData {
    fn from(actions: &QuickActions) -> Self {
        Self {
            active_services: actions
                .active_services
                .iter()
                .map(|service| ServiceSummaryData {
                    id: service.id.to_string(),
                    name: service.name.clone(),
                    price_cents: service.price_cents,
                })
                .collect(),
            available_barbers: actions
                .available_barbers
                .iter()
                .map(|barber| BarberSummaryData {
                    id: barber.id.to_string(),
                    name: barber.name.clone(),
                })
                .collect(),
        }
    }
}
