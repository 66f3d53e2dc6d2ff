use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::Role;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::client::models::ClientId;
use crate::domain::dashboard::errors::DashboardError;
use crate::domain::dashboard::models::ActiveServiceSummary;
use crate::domain::dashboard::models::BarberSummary;
use crate::domain::dashboard::models::RecentClient;
use crate::domain::dashboard::ports::DashboardRepository;
use crate::domain::offering::models::OfferingId;

#[derive(Debug, FromRow)]
struct RecentClientRow {
    id: Uuid,
    name: String,
    lastname: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, FromRow)]
struct ServiceSummaryRow {
    id: Uuid,
    name: String,
    price_cents: i64,
}

#[derive(Debug, FromRow)]
struct BarberSummaryRow {
    id: Uuid,
    name: String,
}

fn database_error(e: sqlx::Error) -> DashboardError {
    DashboardError::DatabaseError(e.to_string())
}

/// Read-only aggregate queries over clients, services and staff.
pub struct PostgresDashboardRepository {
    pool: PgPool,
}

impl PostgresDashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DashboardRepository for PostgresDashboardRepository {
    async fn count_clients(&self, barbershop_id: BarbershopId) -> Result<i64, DashboardError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM clients WHERE barbershop_id = $1")
            .bind(barbershop_id.0)
            .fetch_one(&self.pool)
            .await
            .map_err(database_error)
    }

    async fn count_clients_since(
        &self,
        barbershop_id: BarbershopId,
        since: DateTime<Utc>,
    ) -> Result<i64, DashboardError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM clients WHERE barbershop_id = $1 AND created_at >= $2",
        )
        .bind(barbershop_id.0)
        .bind(since)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn count_active_offerings(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<i64, DashboardError> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM services WHERE barbershop_id = $1 AND active",
        )
        .bind(barbershop_id.0)
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn count_barbers(&self, barbershop_id: BarbershopId) -> Result<i64, DashboardError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*) FROM accounts
            WHERE barbershop_id = $1 AND role_id = $2 AND is_active
            "#,
        )
        .bind(barbershop_id.0)
        .bind(Role::Barber.id())
        .fetch_one(&self.pool)
        .await
        .map_err(database_error)
    }

    async fn recent_clients(
        &self,
        barbershop_id: BarbershopId,
        limit: i64,
    ) -> Result<Vec<RecentClient>, DashboardError> {
        let rows = sqlx::query_as::<_, RecentClientRow>(
            r#"
            SELECT id, name, lastname, created_at
            FROM clients
            WHERE barbershop_id = $1
            ORDER BY created_at DESC
            LIMIT $2
            "#,
        )
        .bind(barbershop_id.0)
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows
            .into_iter()
            .map(|r| RecentClient {
                id: ClientId(r.id),
                name: r.name,
                lastname: r.lastname,
                created_at: r.created_at,
            })
            .collect())
    }

    async fn active_offerings(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<Vec<ActiveServiceSummary>, DashboardError> {
        let rows = sqlx::query_as::<_, ServiceSummaryRow>(
            r#"
            SELECT id, name, price_cents
            FROM services
            WHERE barbershop_id = $1 AND active
            ORDER BY name
            "#,
        )
        .bind(barbershop_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows
            .into_iter()
            .map(|r| ActiveServiceSummary {
                id: OfferingId(r.id),
                name: r.name,
                price_cents: r.price_cents,
            })
            .collect())
    }

    async fn barbers(
        &self,
        barbershop_id: BarbershopId,
    ) -> Result<Vec<BarberSummary>, DashboardError> {
        let rows = sqlx::query_as::<_, BarberSummaryRow>(
            r#"
            SELECT id, name
            FROM accounts
            WHERE barbershop_id = $1 AND role_id = $2 AND is_active
            ORDER BY name
            "#,
        )
        .bind(barbershop_id.0)
        .bind(Role::Barber.id())
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows
            .into_iter()
            .map(|r| BarberSummary {
                id: AccountId(r.id),
                name: r.name,
            })
            .collect())
    }
}
