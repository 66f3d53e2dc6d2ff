use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::barbershop::models::BarbershopId;
use crate::domain::client::errors::ClientError;
use crate::domain::client::models::Client;
use crate::domain::client::models::ClientId;
use crate::domain::client::models::CreateClientCommand;
use crate::domain::client::models::UpdateClientCommand;
use crate::domain::client::ports::ClientRepository;
use crate::domain::client::ports::ClientServicePort;

/// Domain service implementation for client operations.
pub struct ClientService<CR>
where
    CR: ClientRepository,
{
    repository: Arc<CR>,
}

impl<CR> ClientService<CR>
where
    CR: ClientRepository,
{
    pub fn new(repository: Arc<CR>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl<CR> ClientServicePort for ClientService<CR>
where
    CR: ClientRepository,
{
    async fn create_client(
        &self,
        barbershop_id: BarbershopId,
        command: CreateClientCommand,
    ) -> Result<Client, ClientError> {
        let created = self
            .repository
            .create(Client::new(barbershop_id, command))
            .await?;

        tracing::info!(client_id = %created.id, barbershop_id = %barbershop_id, "Client created");

        Ok(created)
    }

    async fn list_clients(&self, barbershop_id: BarbershopId) -> Result<Vec<Client>, ClientError> {
        self.repository.list(barbershop_id).await
    }

    async fn get_client(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
    ) -> Result<Client, ClientError> {
        self.repository
            .find_by_id(barbershop_id, id)
            .await?
            .ok_or(ClientError::NotFound(id.to_string()))
    }

    async fn update_client(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
        command: UpdateClientCommand,
    ) -> Result<Client, ClientError> {
        let mut client = self.get_client(barbershop_id, id).await?;

        if let Some(name) = command.name {
            client.name = name;
        }

        if let Some(lastname) = command.lastname {
            client.lastname = lastname;
        }

        if let Some(phone) = command.phone {
            client.phone = phone;
        }

        if let Some(email) = command.email {
            client.email = Some(email);
        }

        if let Some(notes) = command.notes {
            client.notes = Some(notes);
        }

        client.updated_at = Utc::now();

        self.repository.update(client).await
    }

    async fn delete_client(
        &self,
        barbershop_id: BarbershopId,
        id: &ClientId,
    ) -> Result<(), ClientError> {
        self.repository.delete(barbershop_id, id).await
    }

    async fn find_by_phone(
        &self,
        barbershop_id: BarbershopId,
        phone: &str,
    ) -> Result<Client, ClientError> {
        self.repository
            .find_by_phone(barbershop_id, phone)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("phone {}", phone)))
    }

    async fn find_by_email(
        &self,
        barbershop_id: BarbershopId,
        email: &str,
    ) -> Result<Client, ClientError> {
        self.repository
            .find_by_email(barbershop_id, email)
            .await?
            .ok_or_else(|| ClientError::NotFound(format!("email {}", email)))
    }
}
