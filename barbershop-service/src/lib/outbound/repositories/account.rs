use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::FromRow;
use sqlx::PgExecutor;
use sqlx::PgPool;
use uuid::Uuid;

use super::constraints;
use super::violation;
use super::Violation;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountFilter;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountRepository;
use crate::domain::barbershop::models::BarbershopId;

const SELECT_ACCOUNT: &str = r#"
    SELECT id, email, password_hash, name, phone_number, avatar_url,
           role_id, barbershop_id, is_active, created_at, updated_at
    FROM accounts
"#;

#[derive(Debug, FromRow)]
pub(super) struct AccountRow {
    id: Uuid,
    email: String,
    password_hash: String,
    name: String,
    phone_number: Option<String>,
    avatar_url: Option<String>,
    role_id: i16,
    barbershop_id: Option<Uuid>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(row.id),
            email: EmailAddress::new(row.email)?,
            password_hash: row.password_hash,
            name: DisplayName::new(row.name)?,
            phone_number: row.phone_number,
            avatar_url: row.avatar_url,
            role: Role::try_from(row.role_id)?,
            barbershop_id: row.barbershop_id.map(BarbershopId),
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Insert one account row. Shared with the tenant registration transaction.
pub(super) async fn insert_account<'e, E>(executor: E, account: &Account) -> Result<(), sqlx::Error>
where
    E: PgExecutor<'e>,
{
    sqlx::query(
        r#"
        INSERT INTO accounts (id, email, password_hash, name, phone_number, avatar_url,
                              role_id, barbershop_id, is_active, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(account.id.0)
    .bind(account.email.as_str())
    .bind(&account.password_hash)
    .bind(account.name.as_str())
    .bind(&account.phone_number)
    .bind(&account.avatar_url)
    .bind(account.role.id())
    .bind(account.barbershop_id.map(|id| id.0))
    .bind(account.is_active)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(executor)
    .await
    .map(|_| ())
}

fn write_error(e: sqlx::Error, account: &Account) -> AccountError {
    match violation(&e) {
        Some(Violation::Unique(constraints::ACCOUNTS_EMAIL)) => {
            AccountError::EmailAlreadyExists(account.email.to_string())
        }
        Some(Violation::ForeignKey(constraints::ACCOUNTS_BARBERSHOP)) => {
            AccountError::BarbershopNotFound(
                account
                    .barbershop_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            )
        }
        _ => AccountError::DatabaseError(e.to_string()),
    }
}

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, account: Account) -> Result<Account, AccountError> {
        insert_account(&self.pool, &account)
            .await
            .map_err(|e| write_error(e, &account))?;

        Ok(account)
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError> {
        let sql = format!("{SELECT_ACCOUNT} WHERE id = $1");

        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let sql = format!("{SELECT_ACCOUNT} WHERE email = $1");

        sqlx::query_as::<_, AccountRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?
            .map(Account::try_from)
            .transpose()
    }

    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountError> {
        let sql = format!(
            "{SELECT_ACCOUNT}
             WHERE ($1::SMALLINT IS NULL OR role_id = $1)
               AND ($2::UUID IS NULL OR barbershop_id = $2)
             ORDER BY created_at DESC"
        );

        let rows = sqlx::query_as::<_, AccountRow>(&sql)
            .bind(filter.role.map(Role::id))
            .bind(filter.barbershop_id.map(|id| id.0))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AccountError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Account::try_from).collect()
    }

    async fn update(&self, account: Account) -> Result<Account, AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET email = $2, password_hash = $3, name = $4, phone_number = $5,
                avatar_url = $6, role_id = $7, barbershop_id = $8, is_active = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(account.id.0)
        .bind(account.email.as_str())
        .bind(&account.password_hash)
        .bind(account.name.as_str())
        .bind(&account.phone_number)
        .bind(&account.avatar_url)
        .bind(account.role.id())
        .bind(account.barbershop_id.map(|id| id.0))
        .bind(account.is_active)
        .bind(account.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, &account))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(account.id.to_string()));
        }

        Ok(account)
    }

    async fn delete(&self, id: &AccountId) -> Result<(), AccountError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| match violation(&e) {
                Some(Violation::ForeignKey(constraints::BARBERSHOPS_OWNER)) => {
                    AccountError::StillOwnsBarbershop(id.to_string())
                }
                _ => AccountError::DatabaseError(e.to_string()),
            })?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
