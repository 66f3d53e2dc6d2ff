use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::required_text;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountProfile;
use crate::domain::barbershop::errors::BarbershopIdError;
use crate::domain::barbershop::errors::DraftError;

/// Barbershop (tenant) entity.
///
/// Every business record (clients, catalog services, staff) is scoped to one
/// barbershop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Barbershop {
    pub id: BarbershopId,
    pub name: String,
    pub address: String,
    pub owner_id: AccountId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Barbershop {
    /// A new, not yet persisted barbershop owned by `owner_id`.
    pub fn new(draft: BarbershopDraft, owner_id: AccountId) -> Self {
        let now = Utc::now();
        Self {
            id: BarbershopId::new(),
            name: draft.name,
            address: draft.address,
            owner_id,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Barbershop unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarbershopId(pub Uuid);

impl BarbershopId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, BarbershopIdError> {
        Uuid::parse_str(s)
            .map(BarbershopId)
            .map_err(|e| BarbershopIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for BarbershopId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BarbershopId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validated name and address of a barbershop to be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarbershopDraft {
    name: String,
    address: String,
}

impl BarbershopDraft {
    const MAX_NAME_LENGTH: usize = 100;
    const MAX_ADDRESS_LENGTH: usize = 255;

    /// # Errors
    /// * `InvalidField` - Name or address is blank or too long
    pub fn new(name: String, address: String) -> Result<Self, DraftError> {
        Ok(Self {
            name: required_text("name", name, Self::MAX_NAME_LENGTH)?,
            address: required_text("address", address, Self::MAX_ADDRESS_LENGTH)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }
}

/// Partial barbershop update.
#[derive(Debug, Default)]
pub struct UpdateBarbershopCommand {
    pub name: Option<String>,
    pub address: Option<String>,
}

impl UpdateBarbershopCommand {
    /// # Errors
    /// * `InvalidField` - A provided field is blank or too long
    pub fn new(name: Option<String>, address: Option<String>) -> Result<Self, DraftError> {
        Ok(Self {
            name: name
                .map(|n| required_text("name", n, BarbershopDraft::MAX_NAME_LENGTH))
                .transpose()?,
            address: address
                .map(|a| required_text("address", a, BarbershopDraft::MAX_ADDRESS_LENGTH))
                .transpose()?,
        })
    }
}

/// Set of barbershops a caller may manage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TenantScope {
    /// Platform administrators manage every barbershop.
    All,
    Barbershop(BarbershopId),
}

impl TenantScope {
    pub fn permits(&self, barbershop_id: BarbershopId) -> bool {
        match self {
            TenantScope::All => true,
            TenantScope::Barbershop(own) => *own == barbershop_id,
        }
    }
}

/// Result of registering a barbershop together with its owner.
#[derive(Debug, Clone)]
pub struct TenantRegistration {
    /// Owner projection, already linked to `barbershop`.
    pub owner: AccountProfile,
    pub barbershop: Barbershop,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::errors::ProfileFieldError;

    #[test]
    fn test_draft_trims_fields() {
        let draft = BarbershopDraft::new(" Central ".to_string(), "Main St 1".to_string()).unwrap();
        assert_eq!(draft.name(), "Central");
        assert_eq!(draft.address(), "Main St 1");
    }

    #[test]
    fn test_draft_rejects_blank_address() {
        let result = BarbershopDraft::new("Central".to_string(), "  ".to_string());
        assert_eq!(
            result,
            Err(DraftError::InvalidField(ProfileFieldError::Empty {
                field: "address"
            }))
        );
    }

    #[test]
    fn test_tenant_scope_permits() {
        let own = BarbershopId::new();
        let other = BarbershopId::new();

        assert!(TenantScope::All.permits(other));
        assert!(TenantScope::Barbershop(own).permits(own));
        assert!(!TenantScope::Barbershop(own).permits(other));
    }

    #[test]
    fn test_new_barbershop_links_owner() {
        let owner_id = AccountId::new();
        let draft = BarbershopDraft::new("Central".to_string(), "Main St 1".to_string()).unwrap();

        let barbershop = Barbershop::new(draft, owner_id);
        assert_eq!(barbershop.owner_id, owner_id);
        assert_eq!(barbershop.created_at, barbershop.updated_at);
    }
}
