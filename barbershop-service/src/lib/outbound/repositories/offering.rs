use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::constraints;
use super::violation;
use super::Violation;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::offering::errors::OfferingError;
use crate::domain::offering::models::Offering;
use crate::domain::offering::models::OfferingId;
use crate::domain::offering::ports::OfferingRepository;

/// Catalog entries live in the `services` table.
const SELECT_OFFERING: &str = r#"
    SELECT id, barbershop_id, name, description, price_cents, duration_minutes,
           active, image_url, created_at, updated_at
    FROM services
"#;

#[derive(Debug, FromRow)]
struct OfferingRow {
    id: Uuid,
    barbershop_id: Uuid,
    name: String,
    description: Option<String>,
    price_cents: i64,
    duration_minutes: i32,
    active: bool,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<OfferingRow> for Offering {
    fn from(row: OfferingRow) -> Self {
        Offering {
            id: OfferingId(row.id),
            barbershop_id: BarbershopId(row.barbershop_id),
            name: row.name,
            description: row.description,
            price_cents: row.price_cents,
            duration_minutes: row.duration_minutes,
            active: row.active,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn database_error(e: sqlx::Error) -> OfferingError {
    OfferingError::DatabaseError(e.to_string())
}

pub struct PostgresOfferingRepository {
    pool: PgPool,
}

impl PostgresOfferingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OfferingRepository for PostgresOfferingRepository {
    async fn create(&self, offering: Offering) -> Result<Offering, OfferingError> {
        sqlx::query(
            r#"
            INSERT INTO services (id, barbershop_id, name, description, price_cents,
                                  duration_minutes, active, image_url, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(offering.id.0)
        .bind(offering.barbershop_id.0)
        .bind(&offering.name)
        .bind(&offering.description)
        .bind(offering.price_cents)
        .bind(offering.duration_minutes)
        .bind(offering.active)
        .bind(&offering.image_url)
        .bind(offering.created_at)
        .bind(offering.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::ForeignKey(constraints::SERVICES_BARBERSHOP)) => {
                OfferingError::BarbershopNotFound(offering.barbershop_id.to_string())
            }
            _ => database_error(e),
        })?;

        Ok(offering)
    }

    async fn find_by_id(&self, id: &OfferingId) -> Result<Option<Offering>, OfferingError> {
        let sql = format!("{SELECT_OFFERING} WHERE id = $1");

        let row = sqlx::query_as::<_, OfferingRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(row.map(Offering::from))
    }

    async fn list(
        &self,
        barbershop_id: Option<BarbershopId>,
    ) -> Result<Vec<Offering>, OfferingError> {
        let sql = format!("{SELECT_OFFERING} WHERE ($1::UUID IS NULL OR barbershop_id = $1) ORDER BY name");

        let rows = sqlx::query_as::<_, OfferingRow>(&sql)
            .bind(barbershop_id.map(|id| id.0))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(rows.into_iter().map(Offering::from).collect())
    }

    async fn update(&self, offering: Offering) -> Result<Offering, OfferingError> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET name = $2, description = $3, price_cents = $4, duration_minutes = $5,
                active = $6, image_url = $7, updated_at = $8
            WHERE id = $1
            "#,
        )
        .bind(offering.id.0)
        .bind(&offering.name)
        .bind(&offering.description)
        .bind(offering.price_cents)
        .bind(offering.duration_minutes)
        .bind(offering.active)
        .bind(&offering.image_url)
        .bind(offering.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(OfferingError::NotFound(offering.id.to_string()));
        }

        Ok(offering)
    }

    async fn delete(&self, id: &OfferingId) -> Result<(), OfferingError> {
        let result = sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(OfferingError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
