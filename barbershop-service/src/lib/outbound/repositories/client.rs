use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgPool;
use uuid::Uuid;

use super::constraints;
use super::violation;
use super::Violation;
use crate::domain::account::models::EmailAddress;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::ports::ClientRepository;

const SELECT_CLIENT: &str = r#"
    SELECT id, barbershop_id, name, lastname, phone, email, notes, created_at, updated_at
    FROM clients
"#;

#[derive(Debug, FromRow)]
struct ClientRow {
    id: Uuid,
    barbershop_id: Uuid,
    name: String,
    lastname: String,
    phone: String,
    email: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ClientRow> for Client {
    type Error = ClientError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        Ok(Client {
            id: ClientId(row.id),
            barbershop_id: BarbershopId(row.barbershop_id),
            name: row.name,
            lastname: row.lastname,
            phone: row.phone,
            email: row.email.map(EmailAddress::new).transpose()?,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ClientError {
    ClientError::DatabaseError(e.to_string())
}

pub struct PostgresClientRepository {
    pool: PgPool,
}

impl PostgresClientRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(
        &self,
        column: &'static str,
        barbershop_id: BarbershopId,
        value: &str,
    ) -> Result<Option<Client>, ClientError> {
        let sql = format!(
            "{SELECT_CLIENT} WHERE barbershop_id = $1 AND {column} = $2 ORDER BY created_at LIMIT 1"
        );

        sqlx::query_as::<_, ClientRow>(&sql)
            .bind(barbershop_id.0)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Client::try_from)
            .transpose()
    }
}

#[async_trait]
impl ClientRepository for PostgresClientRepository {
    async fn create(&self, client: Client) -> Result<Client, ClientError> {
        sqlx::query(
            r#"
            INSERT INTO clients (id, barbershop_id, name, lastname, phone, email, notes,
                                 created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(client.id.0)
        .bind(client.barbershop_id.0)
        .bind(&client.name)
        .bind(&client.lastname)
        .bind(&client.phone)
        .bind(client.email.as_ref().map(EmailAddress::as_str))
        .bind(&client.notes)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match violation(&e) {
            Some(Violation::ForeignKey(constraints::CLIENTS_BARBERSHOP)) => {
                ClientError::BarbershopNotFound(client.barbershop_id.to_string())
            }
            _ => database_error(e),
        })?;

        Ok(client)
    }

    async fn find_by_id(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
    ) -> Result<Option<Client>, ClientError> {
        let sql = format!("{SELECT_CLIENT} WHERE id = $1 AND barbershop_id = $2");

        sqlx::query_as::<_, ClientRow>(&sql)
            .bind(id.0)
            .bind(barbershop_id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(database_error)?
            .map(Client::try_from)
            .transpose()
    }

    async fn list(&self, barbershop_id: BarbershopId) -> Result<Vec<Client>, ClientError> {
        let sql = format!("{SELECT_CLIENT} WHERE barbershop_id = $1 ORDER BY name, lastname");

        let rows = sqlx::query_as::<_, ClientRow>(&sql)
            .bind(barbershop_id.0)
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?;

        rows.into_iter().map(Client::try_from).collect()
    }

    async fn find_by_phone(
        &self,
        barbershop_id: BarbershopId,
        phone: &str,
    ) -> Result<Option<Client>, ClientError> {
        self.find_one("phone", barbershop_id, phone).await
    }

    async fn find_by_email(
        &self,
        barbershop_id: BarbershopId,
        email: &str,
    ) -> Result<Option<Client>, ClientError> {
        self.find_one("email", barbershop_id, email).await
    }

    async fn update(&self, client: Client) -> Result<Client, ClientError> {
        let result = sqlx::query(
            r#"
            UPDATE clients
            SET name = $3, lastname = $4, phone = $5, email = $6, notes = $7, updated_at = $8
            WHERE id = $1 AND barbershop_id = $2
            "#,
        )
        .bind(client.id.0)
        .bind(client.barbershop_id.0)
        .bind(&client.name)
        .bind(&client.lastname)
        .bind(&client.phone)
        .bind(client.email.as_ref().map(EmailAddress::as_str))
        .bind(&client.notes)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ClientError::NotFound(client.id.to_string()));
        }

        Ok(client)
    }

    async fn delete(&self, barbershop_id: BarbershopId, id: &ClientId) -> Result<(), ClientError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = $1 AND barbershop_id = $2")
            .bind(id.0)
            .bind(barbershop_id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ClientError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
