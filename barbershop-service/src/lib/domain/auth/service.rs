use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::Role;
use crate::domain::account::ports::AccountRepository;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RegisterCommand;
use crate::domain::auth::ports::AuthServicePort;

/// Domain service implementation for authentication and authorization.
pub struct AuthService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    authenticator: Arc<auth::Authenticator>,
}

impl<AR> AuthService<AR>
where
    AR: AccountRepository,
{
    /// # Arguments
    /// * `repository` - Account lookup and persistence
    /// * `authenticator` - Password hashing and token issuance
    pub fn new(repository: Arc<AR>, authenticator: Arc<auth::Authenticator>) -> Self {
        Self {
            repository,
            authenticator,
        }
    }
}

/// Resolve a submitted role name; absent or blank means `User`.
fn resolve_role(name: Option<&str>) -> Result<Role, AuthError> {
    match name.map(str::trim).filter(|n| !n.is_empty()) {
        None => Ok(Role::User),
        Some(name) => name
            .parse()
            .map_err(|_| AuthError::InvalidRole(name.to_string())),
    }
}

#[async_trait]
impl<AR> AuthServicePort for AuthService<AR>
where
    AR: AccountRepository,
{
    async fn register(&self, command: RegisterCommand) -> Result<AccountProfile, AuthError> {
        let account = self.prepare_registration(command, None).await?;
        let created = self.repository.create(account).await?;

        tracing::info!(account_id = %created.id, role = %created.role, "Account registered");

        Ok(AccountProfile::from(&created))
    }

    async fn prepare_registration(
        &self,
        command: RegisterCommand,
        forced_role: Option<Role>,
    ) -> Result<Account, AuthError> {
        // Fast path only; the unique constraint is authoritative.
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AuthError::DuplicateEmail(command.email.to_string()));
        }

        let role = match forced_role {
            Some(role) => role,
            None => resolve_role(command.role.as_deref())?,
        };

        let password_hash = self.authenticator.hash_password(command.password.as_str())?;
        let now = Utc::now();

        Ok(Account {
            id: AccountId::new(),
            email: command.email,
            password_hash,
            name: command.name,
            phone_number: command.phone_number,
            avatar_url: None,
            role,
            barbershop_id: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError> {
        let account = match self
            .repository
            .find_by_email(email)
            .await?
            .filter(|account| account.is_active)
        {
            Some(account) => account,
            None => return Err(self.authenticator.reject_unknown(password).into()),
        };

        let account_id = account.id.to_string();
        let subject = auth::TokenSubject {
            id: &account_id,
            email: account.email.as_str(),
            role_id: account.role.id(),
        };

        let result = self
            .authenticator
            .authenticate(password, &account.password_hash, subject)
            .map_err(|e| {
                let err = AuthError::from(e);
                if let AuthError::CredentialFormat(detail) = &err {
                    tracing::error!(account_id = %account.id, %detail, "Stored password hash is malformed");
                }
                err
            })?;

        tracing::debug!(account_id = %account.id, "Login succeeded");

        Ok(LoginOutcome {
            account: AccountProfile::from(&account),
            access_token: result.access_token,
        })
    }

    async fn resolve_identity(&self, token: &str) -> Result<Identity, AuthError> {
        let claims = self.authenticator.validate_token(token)?;

        let account_id = AccountId::from_string(&claims.sub)
            .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

        let account = self
            .repository
            .find_by_id(&account_id)
            .await?
            .ok_or_else(|| AuthError::Unauthorized("account no longer exists".to_string()))?;

        if !account.is_active {
            return Err(AuthError::Unauthorized("account is inactive".to_string()));
        }

        Ok(Identity::from(&account))
    }

    fn authorize(&self, identity: &Identity, allowed: &[Role]) -> Result<(), AuthError> {
        if allowed.contains(&identity.role) {
            Ok(())
        } else {
            Err(AuthError::Forbidden {
                role: identity.role,
            })
        }
    }

    async fn profile(&self, id: &AccountId) -> Result<AccountProfile, AuthError> {
        self.repository
            .find_by_id(id)
            .await?
            .map(|account| AccountProfile::from(&account))
            .ok_or_else(|| AuthError::Unauthorized("account no longer exists".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use mockall::mock;

    use super::*;
    use crate::domain::account::errors::AccountError;
    use crate::domain::account::models::AccountFilter;
    use crate::domain::account::models::DisplayName;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Password;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn list(&self, filter: &AccountFilter) -> Result<Vec<Account>, AccountError>;
            async fn update(&self, account: Account) -> Result<Account, AccountError>;
            async fn delete(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    fn authenticator() -> Arc<auth::Authenticator> {
        let hasher = auth::PasswordHasher::with_cost(auth::HashingCost {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();

        Arc::new(auth::Authenticator::new(SECRET, Duration::hours(24)).with_password_hasher(hasher))
    }

    fn register_command(role: Option<&str>) -> RegisterCommand {
        RegisterCommand {
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password: Password::new("secret123".to_string()).unwrap(),
            name: DisplayName::new("Alice".to_string()).unwrap(),
            phone_number: None,
            role: role.map(str::to_string),
        }
    }

    fn stored_account(authenticator: &auth::Authenticator, role: Role) -> Account {
        Account {
            id: AccountId::new(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: authenticator.hash_password("secret123").unwrap(),
            name: DisplayName::new("Alice".to_string()).unwrap(),
            phone_number: None,
            avatar_url: None,
            role,
            barbershop_id: None,
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn identity(role: Role) -> Identity {
        Identity {
            account_id: AccountId::new(),
            email: "bob@example.com".to_string(),
            role,
            barbershop_id: None,
        }
    }

    #[tokio::test]
    async fn test_register_defaults_to_user_role() {
        let mut repository = MockTestAccountRepository::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| {
                account.role == Role::User
                    && account.password_hash.starts_with("$argon2id$")
                    && account.barbershop_id.is_none()
            })
            .times(1)
            .returning(Ok);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let profile = service.register(register_command(None)).await.unwrap();
        assert_eq!(profile.email, "alice@example.com");
        assert_eq!(profile.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_resolves_role_name() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| account.role == Role::Barber)
            .times(1)
            .returning(Ok);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let profile = service
            .register(register_command(Some("barber")))
            .await
            .unwrap();
        assert_eq!(profile.role, Role::Barber);
    }

    #[tokio::test]
    async fn test_register_unknown_role() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command(Some("wizard"))).await;
        assert!(matches!(result, Err(AuthError::InvalidRole(name)) if name == "wizard"));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_does_not_write() {
        let mut repository = MockTestAccountRepository::new();
        let existing = stored_account(&authenticator(), Role::User);

        repository
            .expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command(None)).await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_register_race_maps_unique_violation() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository
            .expect_create()
            .returning(|account| Err(AccountError::EmailAlreadyExists(account.email.to_string())));

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.register(register_command(None)).await;
        assert!(matches!(result, Err(AuthError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_prepare_registration_forced_role_wins() {
        let mut repository = MockTestAccountRepository::new();

        repository.expect_find_by_email().returning(|_| Ok(None));
        repository.expect_create().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let account = service
            .prepare_registration(register_command(Some("admin")), Some(Role::Owner))
            .await
            .unwrap();
        assert_eq!(account.role, Role::Owner);
    }

    #[tokio::test]
    async fn test_login_then_resolve_identity() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, Role::Owner);
        let account_id = account.id;

        let mut repository = MockTestAccountRepository::new();
        let by_email = account.clone();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(by_email.clone())));
        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator.clone());

        let outcome = service.login("alice@example.com", "secret123").await.unwrap();
        assert_eq!(outcome.account.id, account_id);

        let claims = authenticator.validate_token(&outcome.access_token).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert_eq!(claims.email, "alice@example.com");
        assert_eq!(claims.role_id, Role::Owner.id());

        let identity = service
            .resolve_identity(&outcome.access_token)
            .await
            .unwrap();
        assert_eq!(identity.account_id, account_id);
        assert_eq!(identity.role, Role::Owner);
    }

    #[tokio::test]
    async fn test_login_unknown_email_and_wrong_password_are_indistinguishable() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, Role::User);

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |email| {
                Ok((email == "alice@example.com").then(|| account.clone()))
            });

        let service = AuthService::new(Arc::new(repository), authenticator);

        let unknown = service.login("nobody@example.com", "secret123").await;
        let wrong = service.login("alice@example.com", "wrong-password").await;

        let (Err(unknown), Err(wrong)) = (unknown, wrong) else {
            panic!("both logins must fail");
        };
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn test_login_inactive_account_takes_unknown_account_path() {
        let authenticator = authenticator();
        let mut account = stored_account(&authenticator, Role::Barber);
        account.is_active = false;

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.login("alice@example.com", "secret123").await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_login_with_malformed_hash() {
        let authenticator = authenticator();
        let mut account = stored_account(&authenticator, Role::User);
        account.password_hash = "plaintext".to_string();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.login("alice@example.com", "secret123").await;
        assert!(matches!(result, Err(AuthError::CredentialFormat(_))));
    }

    #[tokio::test]
    async fn test_resolve_identity_for_deleted_account() {
        let authenticator = authenticator();
        let token = authenticator
            .generate_token(auth::TokenSubject {
                id: &AccountId::new().to_string(),
                email: "ghost@example.com",
                role_id: Role::Admin.id(),
            })
            .unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.resolve_identity(&token).await;
        assert!(matches!(result, Err(AuthError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_resolve_identity_uses_live_role() {
        let authenticator = authenticator();
        let account = stored_account(&authenticator, Role::Barber);
        let token = authenticator
            .generate_token(auth::TokenSubject {
                id: &account.id.to_string(),
                email: account.email.as_str(),
                role_id: Role::Admin.id(),
            })
            .unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let identity = service.resolve_identity(&token).await.unwrap();
        assert_eq!(identity.role, Role::Barber);
    }

    #[tokio::test]
    async fn test_resolve_identity_rejects_inactive_account() {
        let authenticator = authenticator();
        let mut account = stored_account(&authenticator, Role::User);
        account.is_active = false;
        let token = authenticator
            .generate_token(auth::TokenSubject {
                id: &account.id.to_string(),
                email: account.email.as_str(),
                role_id: account.role.id(),
            })
            .unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository
            .expect_find_by_id()
            .returning(move |_| Ok(Some(account.clone())));

        let service = AuthService::new(Arc::new(repository), authenticator);

        let result = service.resolve_identity(&token).await;
        assert!(matches!(result, Err(AuthError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn test_resolve_identity_rejects_garbage_and_foreign_tokens() {
        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let garbage = service.resolve_identity("not.a.token").await;
        assert!(matches!(garbage, Err(AuthError::TokenInvalid(_))));

        let foreign = auth::JwtHandler::new(b"another_secret_key_at_least_32_bytes", Duration::hours(1))
            .issue(AccountId::new(), "x@example.com", Role::Admin.id())
            .unwrap();
        let result = service.resolve_identity(&foreign).await;
        assert!(matches!(result, Err(AuthError::TokenInvalid(_))));
    }

    #[tokio::test]
    async fn test_resolve_identity_expired_token() {
        let expired = auth::JwtHandler::new(SECRET, Duration::minutes(5))
            .issue_at(
                AccountId::new(),
                "x@example.com",
                Role::User.id(),
                Utc::now() - Duration::hours(1),
            )
            .unwrap();

        let mut repository = MockTestAccountRepository::new();
        repository.expect_find_by_id().times(0);

        let service = AuthService::new(Arc::new(repository), authenticator());

        let result = service.resolve_identity(&expired).await;
        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[tokio::test]
    async fn test_authorize() {
        let service = AuthService::new(Arc::new(MockTestAccountRepository::new()), authenticator());

        assert!(service
            .authorize(&identity(Role::Admin), &[Role::Admin])
            .is_ok());
        assert!(service
            .authorize(&identity(Role::Barber), &[Role::Admin, Role::Barber])
            .is_ok());
        assert!(matches!(
            service.authorize(&identity(Role::Barber), &[Role::Admin]),
            Err(AuthError::Forbidden { role: Role::Barber })
        ));
        assert!(matches!(
            service.authorize(&identity(Role::Owner), &[]),
            Err(AuthError::Forbidden { .. })
        ));
    }
}
