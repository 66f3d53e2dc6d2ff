use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;

use crate::domain::barbershop::models::BarbershopId;
use crate::domain::dashboard::errors::DashboardError;
use crate::domain::dashboard::models::ActiveServiceSummary;
use crate::domain::dashboard::models::ActivityLimit;
use crate::domain::dashboard::models::BarberSummary;
use crate::domain::dashboard::models::Overview;
use crate::domain::dashboard::models::QuickActions;
use crate::domain::dashboard::models::RecentActivity;
use crate::domain::dashboard::models::RecentClient;
use crate::domain::dashboard::models::Statistics;
use crate::domain::dashboard::models::StatisticsPeriod;

/// Read-only aggregates for one barbershop.
#[async_trait]
pub trait DashboardServicePort: Send + Sync + 'static {
    async fn overview(&self, barbershop_id: BarbershopId) -> Result<Overview, DashboardError>;

    async fn statistics(
        &self,
        barbershop_id: BarbershopId,
        period: StatisticsPeriod,
    ) -> Result<Statistics, DashboardError>;

    async fn recent_activity(
        &self,
        barbershop_id: BarbershopId,
        limit: ActivityLimit,
    ) -> Result<RecentActivity, DashboardError>;

    async fn quick_actions(&self, barbershop_id: BarbershopId)
        -> Result<QuickActions, DashboardError>;
}

/// Aggregate queries backing the dashboard.
#[async_trait]
pub trait DashboardRepository: Send + Sync + 'static {
    async fn count_clients(&self, barbershop_id: BarbershopId) -> Result<i64, DashboardError>;

    async fn count_clients_since(
        &self,
        barbershop_id: BarbershopId,
        since: DateTime<Utc>,
    ) -> Result<i64, DashboardError>;

    async fn count_active_offerings(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<i64, DashboardError>;

    async fn count_barbers(&self, barbershop_id: BarbershopId) -> Result<i64, DashboardError>;

    /// Newest clients first.
    async fn recent_clients(
        &self,
        barbershop_id: BarbershopId,
        limit: i64,
    ) -> Result<Vec<RecentClient>, DashboardError>;

    async fn active_offerings(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<Vec<ActiveServiceSummary>, DashboardError>;

    async fn barbers(&self, barbershop_id: BarbershopId)
        -> Result<Vec<BarberSummary>, DashboardError>;
}
