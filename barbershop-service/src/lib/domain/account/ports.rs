use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountFilter;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::CreateAccountCommand;
use crate::domain::account::models::Role;
use crate::domain::account::models::UpdateAccountCommand;

/// Port for account management (admin user CRUD and barber CRUD).
///
/// `expected_role` narrows single-account operations to one role: an id
/// that exists with a different role is reported as `NotFound`.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Create an account with an already-resolved role.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Email is already registered
    /// * `BarbershopNotFound` - `barbershop_id` does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create_account(&self, command: CreateAccountCommand)
        -> Result<Account, AccountError>;

    /// List accounts matching `filter`.
    async fn list_accounts(&self, filter: AccountFilter) -> Result<Vec<Account>, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist or has another role
    async fn get_account(
        &self,
        id: &AccountId,
        expected_role: Option<Role>,
    ) -> Result<Account, AccountError>;

    /// Apply a partial update. A new password is re-hashed.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist or has another role
    /// * `EmailAlreadyExists` - New email belongs to another account
    async fn update_account(
        &self,
        id: &AccountId,
        command: UpdateAccountCommand,
        expected_role: Option<Role>,
    ) -> Result<Account, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist or has another role
    /// * `StillOwnsBarbershop` - Account is the owner of a barbershop
    async fn delete_account(
        &self,
        id: &AccountId,
        expected_role: Option<Role>,
    ) -> Result<(), AccountError>;
}

/// Persistence operations for the account aggregate.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `EmailAlreadyExists` - Unique constraint on email violated
    /// * `BarbershopNotFound` - Referenced barbershop does not exist
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Exact (case-sensitive) email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Accounts matching `filter`, newest first.
    async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `EmailAlreadyExists` - New email belongs to another account
    async fn update(&self, account: Account) -> Result<Account, AccountError>;

    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `StillOwnsBarbershop` - A barbershop references the account as owner
    async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
}
