use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantScope;
use crate::domain::offering::errors::OfferingError;
use crate::domain::offering::models::CreateOfferingCommand;
use crate::domain::offering::models::Offering;
use crate::domain::offering::models::OfferingId;
use crate::domain::offering::models::UpdateOfferingCommand;
use crate::domain::offering::ports::OfferingRepository;
use crate::domain::offering::ports::OfferingServicePort;

/// Domain service implementation for the service catalog.
pub struct OfferingService<OR>
where
    OR: OfferingRepository,
{
    repository: Arc<OR>,
}

impl<OR> OfferingService<OR>
where
    OR: OfferingRepository,
{
    pub fn new(repository: Arc<OR>) -> Self {
        Self { repository }
    }

    /// Load an entry the caller is allowed to modify.
    async fn load_managed(
        &self,
        id: &OfferingId,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError> {
        let offering = self.get_offering(id).await?;

        if !scope.permits(offering.barbershop_id) {
            return Err(OfferingError::Forbidden(offering.barbershop_id.to_string()));
        }

        Ok(offering)
    }
}

#[async_trait]
impl<OR> OfferingServicePort for OfferingService<OR>
where
    OR: OfferingRepository,
{
    async fn create_offering(
        &self,
        command: CreateOfferingCommand,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError> {
        if !scope.permits(command.barbershop_id) {
            return Err(OfferingError::Forbidden(command.barbershop_id.to_string()));
        }

        let created = self.repository.create(Offering::new(command)).await?;

        tracing::info!(
            offering_id = %created.id,
            barbershop_id = %created.barbershop_id,
            "Catalog service created"
        );

        Ok(created)
    }

    async fn list_offerings(
        &self,
        barbershop_id: Option<BarbershopId>,
    ) -> Result<Vec<Offering>, OfferingError> {
        self.repository.list(barbershop_id).await
    }

    async fn get_offering(&self, id: &OfferingId) -> Result<Offering, OfferingError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(OfferingError::NotFound(id.to_string()))
    }

    async fn update_offering(
        &self,
        id: &OfferingId,
        command: UpdateOfferingCommand,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError> {
        let mut offering = self.load_managed(id, scope).await?;

        if let Some(name) = command.name {
            offering.name = name;
        }

        if let Some(description) = command.description {
            offering.description = Some(description);
        }

        if let Some(price_cents) = command.price_cents {
            offering.price_cents = price_cents;
        }

        if let Some(duration_minutes) = command.duration_minutes {
            offering.duration_minutes = duration_minutes;
        }

        if let Some(active) = command.active {
            offering.active = active;
        }

        if let Some(image_url) = command.image_url {
            offering.image_url = Some(image_url);
        }

        offering.updated_at = Utc::now();

        self.repository.update(offering).await
    }

    async fn toggle_active(
        &self,
        id: &OfferingId,
        scope: TenantScope,
    ) -> Result<Offering, OfferingError> {
        let mut offering = self.load_managed(id, scope).await?;

        offering.active = !offering.active;
        offering.updated_at = Utc::now();

        self.repository.update(offering).await
    }

    async fn delete_offering(
        &self,
        id: &OfferingId,
        scope: TenantScope,
    ) -> Result<(), OfferingError> {
        self.load_managed(id, scope).await?;
        self.repository.delete(id).await
    }
}
