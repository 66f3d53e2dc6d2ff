use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use super::account::insert_account;
use super::constraints;
use super::violation;
use super::Violation;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::auth::errors::AuthError;
use crate::domain::barbershop::errors::BarbershopError;
use crate::domain::barbershop::models::Barbershop;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::ports::BarbershopRepository;

#[derive(Debug, FromRow)]
struct BarbershopRow {
    id: Uuid,
    name: String,
    address: String,
    owner_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<BarbershopRow> for Barbershop {
    fn from(row: BarbershopRow) -> Self {
        Barbershop {
            id: BarbershopId(row.id),
            name: row.name,
            address: row.address,
            owner_id: AccountId(row.owner_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

async fn insert_barbershop<'e, E>(executor: E, barbershop: &Barbershop) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO barbershops (id, name, address, owner_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6)
        "#,
    )
    .bind(barbershop.id.0)
    .bind(&barbershop.name)
    .bind(&barbershop.address)
    .bind(barbershop.owner_id.0)
    .bind(barbershop.created_at)
    .bind(barbershop.updated_at)
    .execute(executor)
    .await
    .map(|_| ())
}

fn database_error(e: sqlx::Error) -> BarbershopError {
    BarbershopError::DatabaseError(e.to_string())
}

pub struct PostgresBarbershopRepository {
    pool: PgPool,
}

impl PostgresBarbershopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BarbershopRepository for PostgresBarbershopRepository {
    async fn create_with_owner(
        &self,
        mut owner: Account,
        barbershop: Barbershop,
    ) -> Result<(Account, Barbershop), BarbershopError> {
        // Dropping the transaction on any early return rolls every write back.
        let mut tx = self.pool.begin().await.map_err(database_error)?;

        insert_account(&mut *tx, &owner)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::Unique(constraints::ACCOUNTS_EMAIL)) => {
                    BarbershopError::Registration(AuthError::DuplicateEmail(owner.email.to_string()))
                }
                _ => database_error(e),
            })?;

        insert_barbershop(&mut *tx, &barbershop)
            .await
            .map_err(database_error)?;

        let linked_at = Utc::now();
        sqlx::query("UPDATE accounts SET barbershop_id = $2, updated_at = $3 WHERE id = $1")
            .bind(owner.id.0)
            .bind(barbershop.id.0)
            .bind(linked_at)
            .execute(&mut *tx)
            .await
            .map_err(database_error)?;

        tx.commit().await.map_err(database_error)?;

        owner.barbershop_id = Some(barbershop.id);
        owner.updated_at = linked_at;

        Ok((owner, barbershop))
    }

    async fn create(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError> {
        insert_barbershop(&self.pool, &barbershop)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey(constraints::BARBERSHOPS_OWNER)) => {
                    BarbershopError::OwnerNotFound(barbershop.owner_id.to_string())
                }
                _ => database_error(e),
            })?;

        Ok(barbershop)
    }

    async fn find_by_id(&self, id: &BarbershopId) -> Result<Option<Barbershop>, BarbershopError> {
        let row = sqlx::query_as::<_, BarbershopRow>(
            r#"
            SELECT id, name, address, owner_id, created_at, updated_at
            FROM barbershops
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(row.map(Barbershop::from))
    }

    async fn list_all(&self) -> Result<Vec<Barbershop>, BarbershopError> {
        let rows = sqlx::query_as::<_, BarbershopRow>(
            r#"
            SELECT id, name, address, owner_id, created_at, updated_at
            FROM barbershops
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(rows.into_iter().map(Barbershop::from).collect())
    }

    async fn update(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError> {
        let result = sqlx::query(
            r#"
            UPDATE barbershops
            SET name = $2, address = $3, updated_at = $4
            WHERE id = $1
            "#,
        )
        .bind(barbershop.id.0)
        .bind(&barbershop.name)
        .bind(&barbershop.address)
        .bind(barbershop.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BarbershopError::NotFound(barbershop.id.to_string()));
        }

        Ok(barbershop)
    }

    async fn delete(&self, id: &BarbershopId) -> Result<(), BarbershopError> {
        let result = sqlx::query("DELETE FROM barbershops WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(BarbershopError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
