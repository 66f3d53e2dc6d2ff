use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::Role;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::barbershop::errors::BarbershopError;
use crate::domain::barbershop::models::Barbershop;
use crate::domain::barbershop::models::BarbershopDraft;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantRegistration;
use crate::domain::barbershop::models::TenantScope;
use crate::domain::barbershop::models::UpdateBarbershopCommand;
use crate::domain::barbershop::ports::BarbershopRepository;
use crate::domain::barbershop::ports::BarbershopServicePort;

/// Domain service implementation for barbershop operations.
///
/// Owner registration rules come from the auth service; persistence of the
/// owner/barbershop pair is delegated to the repository as one transaction.
pub struct BarbershopService<BR, AS>
where
    BR: BarbershopRepository,
    AS: AuthServicePort,
{
    repository: Arc<BR>,
    auth_service: Arc<AS>,
}

impl<BR, AS> BarbershopService<BR, AS>
where
    BR: BarbershopRepository,
    AS: AuthServicePort,
{
    pub fn new(repository: Arc<BR>, auth_service: Arc<AS>) -> Self {
        Self {
            repository,
            auth_service,
        }
    }
}

#[async_trait]
impl<BR, AS> BarbershopServicePort for BarbershopService<BR, AS>
where
    BR: BarbershopRepository,
    AS: AuthServicePort,
{
    async fn register_with_owner(
        &self,
        owner: RegisterCommand,
        draft: BarbershopDraft,
    ) -> Result<TenantRegistration, BarbershopError> {
        let owner = self
            .auth_service
            .prepare_registration(owner, Some(Role::Owner))
            .await?;

        let barbershop = Barbershop::new(draft, owner.id);

        let (owner, barbershop) = self.repository.create_with_owner(owner, barbershop).await?;

        tracing::info!(
            barbershop_id = %barbershop.id,
            owner_id = %owner.id,
            "Barbershop registered with owner"
        );

        Ok(TenantRegistration {
            owner: AccountProfile::from(&owner),
            barbershop,
        })
    }

    async fn create_barbershop(
        &self,
        draft: BarbershopDraft,
        owner_id: AccountId,
    ) -> Result<Barbershop, BarbershopError> {
        let created = self
            .repository
            .create(Barbershop::new(draft, owner_id))
            .await?;

        tracing::info!(barbershop_id = %created.id, owner_id = %owner_id, "Barbershop created");

        Ok(created)
    }

    async fn list_barbershops(&self) -> Result<Vec<Barbershop>, BarbershopError> {
        self.repository.list_all().await
    }

    async fn get_barbershop(&self, id: &BarbershopId) -> Result<Barbershop, BarbershopError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(BarbershopError::NotFound(id.to_string()))
    }

    async fn update_barbershop(
        &self,
        id: &BarbershopId,
        command: UpdateBarbershopCommand,
        scope: TenantScope,
    ) -> Result<Barbershop, BarbershopError> {
        let mut barbershop = self.get_barbershop(id).await?;

        if !scope.permits(barbershop.id) {
            return Err(BarbershopError::Forbidden(id.to_string()));
        }

        if let Some(name) = command.name {
            barbershop.name = name;
        }

        if let Some(address) = command.address {
            barbershop.address = address;
        }

        barbershop.updated_at = Utc::now();

        self.repository.update(barbershop).await
    }

    async fn delete_barbershop(
        &self,
        id: &BarbershopId,
        scope: TenantScope,
    ) -> Result<(), BarbershopError> {
        if !scope.permits(*id) {
            return Err(BarbershopError::Forbidden(id.to_string()));
        }

        self.repository.delete(id).await?;
        tracing::info!(barbershop_id = %id, "Barbershop deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;

    use super::*;
    use crate::domain::account::models::Account;
    use crate::domain::account::models::DisplayName;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Password;
    use crate::domain::auth::errors::AuthError;
    use crate::domain::auth::models::Identity;
    use crate::domain::auth::models::LoginOutcome;

    mock! {
        pub TestBarbershopRepository {}

        #[async_trait]
        impl BarbershopRepository for TestBarbershopRepository {
            async fn create_with_owner(&self, owner: Account, barbershop: Barbershop) -> Result<(Account, Barbershop), BarbershopError>;
            async fn create(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError>;
            async fn find_by_id(&self, id: &BarbershopId) -> Result<Option<Barbershop>, BarbershopError>;
            async fn list_all(&self) -> Result<Vec<Barbershop>, BarbershopError>;
            async fn update(&self, barbershop: Barbershop) -> Result<Barbershop, BarbershopError>;
            async fn delete(&self, id: &BarbershopId) -> Result<(), BarbershopError>;
        }
    }

    mock! {
        pub TestAuthService {}

        #[async_trait]
        impl AuthServicePort for TestAuthService {
            async fn register(&self, command: RegisterCommand) -> Result<AccountProfile, AuthError>;
            async fn prepare_registration(&self, command: RegisterCommand, forced_role: Option<Role>) -> Result<Account, AuthError>;
            async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError>;
            async fn resolve_identity(&self, token: &str) -> Result<Identity, AuthError>;
            fn authorize(&self, identity: &Identity, allowed: &[Role]) -> Result<(), AuthError>;
            async fn profile(&self, id: &AccountId) -> Result<AccountProfile, AuthError>;
        }
    }

    fn owner_command() -> RegisterCommand {
        RegisterCommand {
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: Password::new("secret123".to_string()).unwrap(),
            name: DisplayName::new("Alice".to_string()).unwrap(),
            phone_number: None,
            role: Some("admin".to_string()),
        }
    }

    fn prepared_owner(command: RegisterCommand, role: Role) -> Account {
        Account {
            id: AccountId::new(),
            email: command.email,
            password_hash: "$argon2id$hash".to_string(),
            name: command.name,
            phone_number: command.phone_number,
            avatar_url: None,
            role,
            barbershop_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn draft() -> BarbershopDraft {
        BarbershopDraft::new("Central".to_string(), "Main St 1".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_register_with_owner_links_both_records() {
        let mut auth_service = MockTestAuthService::new();
        let mut repository = MockTestBarbershopRepository::new();

        auth_service
            .expect_prepare_registration()
            .withf(|_, forced_role| *forced_role == Some(Role::Owner))
            .times(1)
            .returning(|command, role| Ok(prepared_owner(command, role.unwrap())));

        repository
            .expect_create_with_owner()
            .withf(|owner, barbershop| {
                barbershop.owner_id == owner.id
                    && barbershop.name == "Central"
                    && barbershop.address == "Main St 1"
            })
            .times(1)
            .returning(|mut owner, barbershop| {
                owner.barbershop_id = Some(barbershop.id);
                Ok((owner, barbershop))
            });

        let service = BarbershopService::new(Arc::new(repository), Arc::new(auth_service));

        let registration = service
            .register_with_owner(owner_command(), draft())
            .await
            .unwrap();

        assert_eq!(registration.owner.role, Role::Owner);
        assert_eq!(registration.owner.email, "alice@example.com");
        assert_eq!(registration.owner.barbershop_id, Some(registration.barbershop.id));
        assert_eq!(registration.barbershop.owner_id, registration.owner.id);
    }

    #[tokio::test]
    async fn test_register_with_owner_duplicate_email_writes_nothing() {
        let mut auth_service = MockTestAuthService::new();
        let mut repository = MockTestBarbershopRepository::new();

        auth_service
            .expect_prepare_registration()
            .times(1)
            .returning(|command, _| Err(AuthError::DuplicateEmail(command.email.to_string())));
        repository.expect_create_with_owner().times(0);

        let service = BarbershopService::new(Arc::new(repository), Arc::new(auth_service));

        let result = service.register_with_owner(owner_command(), draft()).await;
        assert!(matches!(
            result,
            Err(BarbershopError::Registration(AuthError::DuplicateEmail(_)))
        ));
    }

    #[tokio::test]
    async fn test_register_with_owner_propagates_storage_failure() {
        let mut auth_service = MockTestAuthService::new();
        let mut repository = MockTestBarbershopRepository::new();

        auth_service
            .expect_prepare_registration()
            .returning(|command, role| Ok(prepared_owner(command, role.unwrap())));
        repository
            .expect_create_with_owner()
            .times(1)
            .returning(|_, _| Err(BarbershopError::DatabaseError("connection reset".to_string())));

        let service = BarbershopService::new(Arc::new(repository), Arc::new(auth_service));

        let result = service.register_with_owner(owner_command(), draft()).await;
        assert!(matches!(result, Err(BarbershopError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn test_update_barbershop_partial() {
        let mut repository = MockTestBarbershopRepository::new();
        let existing = Barbershop::new(draft(), AccountId::new());
        let id = existing.id;

        repository
            .expect_find_by_id()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository
            .expect_update()
            .withf(|barbershop| barbershop.name == "Uptown" && barbershop.address == "Main St 1")
            .times(1)
            .returning(Ok);

        let service = BarbershopService::new(
            Arc::new(repository),
            Arc::new(MockTestAuthService::new()),
        );

        let command = UpdateBarbershopCommand::new(Some("Uptown".to_string()), None).unwrap();
        let updated = service
            .update_barbershop(&id, command, TenantScope::Barbershop(id))
            .await
            .unwrap();
        assert_eq!(updated.name, "Uptown");
    }

    #[tokio::test]
    async fn test_update_foreign_barbershop_forbidden() {
        let mut repository = MockTestBarbershopRepository::new();
        let existing = Barbershop::new(draft(), AccountId::new());
        let id = existing.id;

        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_update().times(0);

        let service = BarbershopService::new(
            Arc::new(repository),
            Arc::new(MockTestAuthService::new()),
        );

        let command = UpdateBarbershopCommand::new(Some("Uptown".to_string()), None).unwrap();
        let result = service
            .update_barbershop(&id, command, TenantScope::Barbershop(BarbershopId::new()))
            .await;
        assert!(matches!(result, Err(BarbershopError::Forbidden(_))));
    }

    #[tokio::test]
    async fn test_admin_deletes_any_barbershop() {
        let mut repository = MockTestBarbershopRepository::new();
        let id = BarbershopId::new();

        repository
            .expect_delete()
            .withf(move |candidate| *candidate == id)
            .times(1)
            .returning(|_| Ok(()));

        let service = BarbershopService::new(
            Arc::new(repository),
            Arc::new(MockTestAuthService::new()),
        );

        assert!(service.delete_barbershop(&id, TenantScope::All).await.is_ok());
    }

    #[tokio::test]
    async fn test_get_barbershop_not_found() {
        let mut repository = MockTestBarbershopRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = BarbershopService::new(
            Arc::new(repository),
            Arc::new(MockTestAuthService::new()),
        );

        let result = service.get_barbershop(&BarbershopId::new()).await;
        assert!(matches!(result, Err(BarbershopError::NotFound(_))));
    }
}
