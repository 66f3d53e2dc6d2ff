use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountFilter;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::UpdateAccountCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Domain service implementation for account management.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    password_hasher: auth::PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `password_hasher` - Hasher configured with the service work factor
    pub fn new(repository: Arc<AR>, password_hasher: auth::PasswordHasher) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    async fn load(
        &self,
        id: &AccountId,
        expected_role: Option<Role>,
    ) -> Result<Account, AccountError> {
        self.repository
            .find_by_id(id)
            .await?
            .filter(|account| expected_role.map_or(true, |role| account.role == role))
            .ok_or(AccountError::NotFound(id.to_string()))
    }

    fn hash(&self, password: &str) -> Result<String, AccountError> {
        self.password_hasher
            .hash(password)
            .map_err(|e| AccountError::Hashing(e.to_string()))
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn create_account(
        &self,
        command: CreateAccountCommand,
    ) -> Result<Account, AccountError> {
        let password_hash = self.hash(command.password.as_str())?;
        let now = Utc::now();

        let account = Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            name: command.name,
            phone_number: command.phone_number,
            avatar_url: command.avatar_url,
            role: command.role,
            barbershop_id: command.barbershop_id,
            is_active: true,
            created_at: now,
            updated_at: now,
        };

        let created = self.repository.create(account).await?;
        tracing::info!(account_id = %created.id, role = %created.role, "Account created");

        Ok(created)
    }

    async fn list_accounts(&self, filter: AccountFilter) -> Result<Vec<Account>, AccountError> {
        self.repository.list(&filter).await
    }

    async fn get_account(
        &self,
        id: &AccountId,
        expected_role: Option<Role>,
    ) -> Result<Account, AccountError> {
        self.load(id, expected_role).await
    }

    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
        expected_role: Option<Role>,
    ) -> Result<Account, AccountError> {
        let mut account = self.load(id, expected_role).await?;

        if let Some(email) = command.email {
            account.email = email;
        }

        if let Some(password) = command.password {
            account.password_hash = self.hash(password.as_str())?;
        }

        if let Some(name) = command.name {
            account.name = name;
        }

        if let Some(phone_number) = command.phone_number {
            account.phone_number = Some(phone_number);
        }

        if let Some(avatar_url) = command.avatar_url {
            account.avatar_url = Some(avatar_url);
        }

        if let Some(barbershop_id) = command.barbershop_id {
            account.barbershop_id = Some(barbershop_id);
        }

        if let Some(is_active) = command.is_active {
            account.is_active = is_active;
        }

        account.updated_at = Utc::now();

        self.repository.update(account).await
    }

    async fn delete_account(
        &self,
        id: &AccountId,
        expected_role: Option<Role>,
    ) -> Result<(), AccountError> {
        if expected_role.is_some() {
            self.load(id, expected_role).await?;
        }

        self.repository.delete(id).await?;
        tracing::info!(account_id = %id, "Account deleted");

        Ok(())
    }
}
