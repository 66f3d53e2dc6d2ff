use async_trait::async_trait;

use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::Role;
use crate::domain::auth::errors::AuthError;
use crate::domain::auth::models::Identity;
use crate::domain::auth::models::LoginOutcome;
use crate::domain::auth::models::RegisterCommand;

/// Port for authentication and authorization.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Register a new account and return its sanitized projection.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `InvalidRole` - Role name does not resolve
    /// * `DatabaseError` - Database operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AccountProfile, AuthError>;

    /// Apply the registration rules and build the account without persisting it.
    ///
    /// `forced_role` overrides the role named in the command. Used by flows
    /// that persist the account together with other records.
    ///
    /// # Errors
    /// * `DuplicateEmail` - Email is already registered
    /// * `InvalidRole` - Role name does not resolve
    async fn prepare_registration(
        &self,
        command: RegisterCommand,
        forced_role: Option<Role>,
    ) -> Result<Account, AuthError>;

    /// Verify credentials and issue an identity token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email, wrong password or inactive account
    /// * `CredentialFormat` - Stored hash is malformed
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthError>;

    /// Verify a bearer token and load the live account behind it.
    ///
    /// # Errors
    /// * `TokenExpired` - Token lifetime has elapsed
    /// * `TokenInvalid` - Signature or structure is invalid
    /// * `Unauthorized` - Account no longer exists or is inactive
    async fn resolve_identity(&self, token: &str) -> Result<Identity, AuthError>;

    /// # Errors
    /// * `Forbidden` - `identity.role` is not in `allowed`
    fn authorize(&self, identity: &Identity, allowed: &[Role]) -> Result<(), AuthError>;

    /// Sanitized projection of the given account.
    ///
    /// # Errors
    /// * `Unauthorized` - Account no longer exists
    async fn profile(&self, id: &AccountId) -> Result<AccountProfile, AuthError>;
}
