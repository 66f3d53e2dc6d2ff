use async_trait::async_trait;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::barbershop::errors::BarbershopError;
use crate::domain::barbershop::models::Barbershop;
use crate::domain::barbershop::models::BarbershopDraft;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantRegistration;
use crate::domain::barbershop::models::TenantScope;
use crate::domain::barbershop::models::UpdateBarbershopCommand;

/// Port for barbershop (tenant) operations.
#[async_trait]
pub trait BarbershopServicePort: Send + Sync + 'static {
    /// Register a barbershop and its owner account in one step.
    ///
    /// The owner is always created with role `Owner`, whatever the command
    /// names. Nothing is persisted unless every write succeeds.
    ///
    /// # Errors
    /// * `Registration(DuplicateEmail)` - Owner email is already registered
    /// * `DatabaseError` - Database operation failed
    async fn register_with_owner(
        &self,
        owner: RegisterCommand,
        draft: BarbershopDraft,
    ) -> Result<TenantRegistration, BarbershopError>;

    /// Create a barbershop for an existing account.
    ///
    /// # Errors
    /// * `OwnerNotFound` - `owner_id` does not reference an account
    async fn create_barbershop(
        &self,
        draft: BarbershopDraft,
        owner_id: AccountId,
    ) -> Result<Barbershop, BarbershopError>;

    async fn list_barbershops(&self) -> Result<Vec<Barbershop>, BarbershopError>;

    /// # Errors
    /// * `NotFound` - Barbershop does not exist
    async fn get_barbershop(&self, id: &BarbershopId) -> Result<Barbershop, BarbershopError>;

    /// # Errors
    /// * `NotFound` - Barbershop does not exist
    /// * `Forbidden` - Barbershop is outside `scope`
    async fn update_barbershop(
        &self,
        id: &BarbershopId,
        command: UpdateBarbershopCommand,
        scope: TenantScope,
    ) -> Result<Barbershop, BarbershopError>;

    /// Remove a barbershop. Accounts that referenced it are kept, unlinked.
    ///
    /// # Errors
    /// * `NotFound` - Barbershop does not exist
    /// * `Forbidden` - Barbershop is outside `scope`
    async fn delete_barbershop(
        &self,
        id: &BarbershopId,
        scope: TenantScope,
    ) -> Result<(), BarbershopError>;
}

/// Persistence operations for barbershops.
#[async_trait]
pub trait BarbershopRepository: Send + Sync + 'static {
    /// Insert the owner account, insert the barbershop and link the owner to
    /// it, in a single transaction.
    ///
    /// # Returns
    /// The owner (with `barbershop_id` set) and the barbershop
    ///
    /// # Errors
    /// * `Registration(DuplicateEmail)` - Owner email unique constraint violated
    /// * `DatabaseError` - Any write failed; all writes are rolled back
    async fn create_with_owner(
        &self,
        owner: Account,
        barbershop: Barbershop,
    ) -> Result<(Account, Barbershop), BarbershopError>;

    /// # Errors
    /// * `OwnerNotFound` - Owner foreign key violated
    async fn create(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError>;

    async fn find_by_id(&self, id: &BarbershopId) -> Result<Option<Barbershop>, BarbershopError>;

    /// All barbershops, newest first.
    async fn list_all(&self) -> Result<Vec<Barbershop>, BarbershopError>;

    /// # Errors
    /// * `NotFound` - Barbershop does not exist
    async fn update(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError>;

    /// # Errors
    /// * `NotFound` - Barbershop does not exist
    async fn delete(&self, id: &BarbershopId) -> Result<(), BarbershopError>;
}
