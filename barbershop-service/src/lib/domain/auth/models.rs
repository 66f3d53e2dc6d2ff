use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::DisplayName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Password;
use crate::domain::account::models::Role;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::barbershop::models::TenantScope;

/// Self-service registration request.
///
/// `role` is the raw role name as submitted; it is resolved by the service
/// so that an unknown name surfaces as `InvalidRole`.
#[derive(Debug, Clone)]
pub struct RegisterCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub name: DisplayName,
    pub phone_number: Option<String>,
    pub role: Option<String>,
}

/// Successful login: the sanitized account and a freshly issued token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub account: AccountProfile,
    pub access_token: String,
}

/// Authenticated caller attached to a request.
///
/// Built from the live account row, not from token claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub account_id: AccountId,
    pub email: String,
    pub role: Role,
    pub barbershop_id: Option<BarbershopId>,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            account_id: account.id,
            email: account.email.as_str().to_string(),
            role: account.role,
            barbershop_id: account.barbershop_id,
        }
    }
}

impl Identity {
    /// Barbershops this caller may manage; `None` for staff not yet linked
    /// to any barbershop.
    pub fn tenant_scope(&self) -> Option<TenantScope> {
        match (self.role, self.barbershop_id) {
            (Role::Admin, _) => Some(TenantScope::All),
            (_, Some(id)) => Some(TenantScope::Barbershop(id)),
            (_, None) => None,
        }
    }
}

/// Access rule attached to a group of routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessPolicy {
    /// No token required.
    Public,
    /// Any valid token for an existing, active account.
    Authenticated,
    /// Valid token and a role from the list.
    Roles(&'static [Role]),
}

impl AccessPolicy {
    pub const ADMIN: AccessPolicy = AccessPolicy::Roles(&[Role::Admin]);
    pub const ADMIN_OR_BARBER: AccessPolicy = AccessPolicy::Roles(&[Role::Admin, Role::Barber]);
    pub const STAFF: AccessPolicy = AccessPolicy::Roles(&[Role::Admin, Role::Barber, Role::Owner]);

    /// Roles the caller must hold, if the policy restricts roles at all.
    pub fn allowed_roles(&self) -> Option<&'static [Role]> {
        match self {
            AccessPolicy::Roles(roles) => Some(roles),
            _ => None,
        }
    }

    pub fn requires_identity(&self) -> bool {
        !matches!(self, AccessPolicy::Public)
    }
}
