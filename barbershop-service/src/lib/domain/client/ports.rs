use async_trait::async_trait;

use crate::domain::barbershop::models::BarbershopId;
use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::UpdateClientCommand;

/// Port for client operations.
///
/// Every operation is scoped to one barbershop; a client of another
/// barbershop is reported as `NotFound`.
#[async_trait]
pub trait ClientServicePort: Send + Sync + 'static {
    async fn create_client(
        &self,
        barbershop_id: BarbershopId,
        command: CreateClientCommand,
    ) -> Result<Client, ClientError>;

    /// Clients of the barbershop ordered by name.
    async fn list_clients(&self, barbershop_id: BarbershopId) -> Result<Vec<Client>, ClientError>;

    /// # Errors
    /// * `NotFound` - No such client in this barbershop
    async fn get_client(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
    ) -> Result<Client, ClientError>;

    /// # Errors
    /// * `NotFound` - No such client in this barbershop
    async fn update_client(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
        command: UpdateClientCommand,
    ) -> Result<Client, ClientError>;

    /// # Errors
    /// * `NotFound` - No such client in this barbershop
    async fn delete_client(&self, barbershop_id: BarbershopId, id: &ClientId)
        -> Result<(), ClientError>;

    /// # Errors
    /// * `NotFound` - No client with this phone number
    async fn find_by_phone(
        &self,
        barbershop_id: BarbershopId,
        phone: &str,
    ) -> Result<Client, ClientError>;

    /// # Errors
    /// * `NotFound` - No client with this email
    async fn find_by_email(
        &self,
        barbershop_id: BarbershopId,
        email: &str,
    ) -> Result<Client, ClientError>;
}

/// Persistence operations for clients.
#[async_trait]
pub trait ClientRepository: Send + Sync + 'static {
    /// # Errors
    /// * `BarbershopNotFound` - Barbershop foreign key violated
    async fn create(&self, client: Client) -> Result<Client, ClientError>;

    async fn find_by_id(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
    ) -> Result<Option<Client>, ClientError>;

    /// Clients of the barbershop ordered by name.
    async fn list(&self, barbershop_id: BarbershopId) -> Result<Vec<Client>, ClientError>;

    async fn find_by_phone(
        &self,
        barbershop_id: BarbershopId,
        phone: &str,
    ) -> Result<Option<Client>, ClientError>;

    async fn find_by_email(
        &self,
        barbershop_id: BarbershopId,
        email: &str,
    ) -> Result<Option<Client>, ClientError>;

    /// # Errors
    /// * `NotFound` - Client does not exist
    async fn update(&self, client: Client) -> Result<Client, ClientError>;

    /// # Errors
    /// * `NotFound` - No such client in this barbershop
    async fn delete(&self, barbershop_id: BarbershopId, id: &ClientId) -> Result<(), ClientError>;
}
