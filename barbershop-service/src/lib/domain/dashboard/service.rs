use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::barbershop::models::BarbershopId;
use crate::domain::dashboard::errors::DashboardError;
use crate::domain::dashboard::models::ActivityLimit;
use crate::domain::dashboard::models::Overview;
use crate::domain::dashboard::models::QuickActions;
use crate::domain::dashboard::models::RecentActivity;
use crate::domain::dashboard::models::Statistics;
use crate::domain::dashboard::models::StatisticsPeriod;
use crate::domain::dashboard::ports::DashboardRepository;
use crate::domain::dashboard::ports::DashboardServicePort;

pub struct DashboardService<DR>
where
    DR: DashboardRepository,
{
    repository: Arc<DR>,
}

impl<DR> DashboardService<DR>
where
    DR: DashboardRepository,
{
    pub fn new(repository: Arc<DR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<DR> DashboardServicePort for DashboardService<DR>
where
    DR: DashboardRepository,
{
    async fn overview(&self, barbershop_id: BarbershopId) -> Result<Overview, DashboardError> {
        let (total_clients, total_services, total_barbers) = tokio::try_join!(
            self.repository.count_clients(barbershop_id),
            self.repository.count_active_offerings(barbershop_id),
            self.repository.count_barbers(barbershop_id),
        )?;

        Ok(Overview {
            total_clients,
            total_services,
            total_barbers,
        })
    }

    async fn statistics(
        &self,
        barbershop_id: BarbershopId,
        period: StatisticsPeriod,
    ) -> Result<Statistics, DashboardError> {
        let since = period.start(Utc::now());
        let new_clients = self
            .repository
            .count_clients_since(barbershop_id, since)
            .await?;

        Ok(Statistics {
            period,
            since,
            new_clients,
        })
    }

    async fn recent_activity(
        &self,
        barbershop_id: BarbershopId,
        limit: ActivityLimit,
    ) -> Result<RecentActivity, DashboardError> {
        let recent_clients = self
            .repository
            .recent_clients(barbershop_id, limit.value())
            .await?;

        Ok(RecentActivity { recent_clients })
    }

    async fn quick_actions(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<QuickActions, DashboardError> {
        let (active_services, available_barbers) = tokio::try_join!(
            self.repository.active_offerings(barbershop_id),
            self.repository.barbers(barbershop_id),
        )?;

        Ok(QuickActions {
            active_services,
            available_barbers,
        })
    }
}
