use async_trait::async_trait;

use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantScope;
use crate::domain::offering::errors::OfferingError;
use crate::domain::offering::models::CreateOfferingCommand;
use crate::domain::offering::models::Offering;
use crate::domain::offering::models::OfferingId;
use crate::domain::offering::models::UpdateOfferingCommand;

/// Port for the service catalog.
///
/// Reads are unrestricted; writes are checked against the caller's
/// `TenantScope`.
#[async_trait]
pub trait OfferingServicePort: Send + Sync + 'static {
    /// # Errors
    /// * `Forbidden` - Target barbershop is outside `scope`
    /// * `BarbershopNotFound` - Target barbershop does not exist
    async fn create_offering(
        &self,
        command: CreateOfferingCommand,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError>;

    /// Catalog entries ordered by name, optionally for one barbershop.
    async fn list_offerings(
        &self,
        barbershop_id: Option<BarbershopId>,
    ) -> Result<Vec<Offering>, OfferingError>;

    /// # Errors
    /// * `NotFound` - Entry does not exist
    async fn get_offering(&self, id: &OfferingId) -> Result<Offering, OfferingError>;

    /// # Errors
    /// * `NotFound` - Entry does not exist
    /// * `Forbidden` - Entry belongs to a barbershop outside `scope`
    async fn update_offering(
        &self,
        id: &OfferingId,
        command: UpdateOfferingCommand,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError>;

    /// Flip the `active` flag.
    async fn toggle_active(
        &self,
        id: &OfferingId,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError>;

    async fn delete_offering(&self, id: &OfferingId, scope: TenantScope)
        -> Result<(), OfferingError>;
}

/// Persistence operations for catalog entries.
#[async_trait]
pub trait OfferingRepository: Send + Sync + 'static {
    /// # Errors
    /// * `BarbershopNotFound` - Barbershop foreign key violated
    async fn create(&self, offering: Offering) -> Result<Offering, OfferingError>;

    async fn find_by_id(&self, id: &OfferingId) -> Result<Option<Offering>, OfferingError>;

    /// Entries ordered by name; all barbershops when `barbershop_id` is `None`.
    async fn list(&self, barbershop_id: Option<BarbershopId>)
        -> Result<Vec<Offering>, OfferingError>;

    /// # Errors
    /// * `NotFound` - Entry does not exist
    async fn update(&self, offering: Offering) -> Result<Offering, OfferingError>;

    /// # Errors
    /// * `NotFound` - Entry does not exist
    async fn delete(&self, id: &OfferingId) -> Result<(), OfferingError>;
}
