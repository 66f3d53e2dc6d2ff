use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::PasswordPolicyError;
use crate::domain::account::errors::ProfileFieldError;
use crate::domain::account::errors::RoleError;
use crate::domain::barbershop::models::BarbershopId;

/// Account aggregate entity.
///
/// Any person who can sign in: owners, barbers, admins and end users.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: AccountId,
    pub email: EmailAddress,
    pub password_hash: String,
    pub name: DisplayName,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub barbershop_id: Option<BarbershopId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Validates email format using RFC 5322 compliant parser. Stored as given,
/// so uniqueness is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Access role of an account.
///
/// The numeric ids are the seeded `roles` rows and the `role_id` token claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Owner,
    Barber,
    Admin,
    User,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Owner, Role::Barber, Role::Admin, Role::User];

    pub fn id(self) -> i16 {
        match self {
            Role::Owner => 1,
            Role::Barber => 2,
            Role::Admin => 3,
            Role::User => 4,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Barber => "barber",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl TryFrom<i16> for Role {
    type Error = RoleError;

    fn try_from(id: i16) -> Result<Self, Self::Error> {
        Role::ALL
            .into_iter()
            .find(|role| role.id() == id)
            .ok_or(RoleError::UnknownId(id))
    }
}

impl FromStr for Role {
    type Err = RoleError;

    /// Role names are matched case-insensitively ("owner", "OWNER").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Role::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| RoleError::UnknownName(s.to_string()))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable name of a person.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 100;

    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 100 characters
    pub fn new(name: String) -> Result<Self, ProfileFieldError> {
        required_text("name", name, Self::MAX_LENGTH).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Trim `value` and check it is non-empty and at most `max` characters.
pub fn required_text(
    field: &'static str,
    value: String,
    max: usize,
) -> Result<String, ProfileFieldError> {
    let trimmed = value.trim();
    let actual = trimmed.chars().count();

    if actual == 0 {
        Err(ProfileFieldError::Empty { field })
    } else if actual > max {
        Err(ProfileFieldError::TooLong { field, max, actual })
    } else {
        Ok(trimmed.to_string())
    }
}

/// Blank optional text is treated as absent.
pub fn optional_text(
    field: &'static str,
    value: Option<String>,
    max: usize,
) -> Result<Option<String>, ProfileFieldError> {
    match value {
        Some(v) if !v.trim().is_empty() => required_text(field, v, max).map(Some),
        _ => Ok(None),
    }
}

/// Plaintext password accepted for hashing.
///
/// Never printed: `Debug` is redacted.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub const MIN_LENGTH: usize = 6;

    /// # Errors
    /// * `TooShort` - Fewer than 6 characters
    pub fn new(password: String) -> Result<Self, PasswordPolicyError> {
        let actual = password.chars().count();
        if actual < Self::MIN_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: Self::MIN_LENGTH,
                actual,
            });
        }
        Ok(Self(password))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(***)")
    }
}

/// Account projection safe to return to clients (no password hash).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub id: AccountId,
    pub email: String,
    pub name: String,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub barbershop_id: Option<BarbershopId>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Account> for AccountProfile {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            email: account.email.as_str().to_string(),
            name: account.name.as_str().to_string(),
            phone_number: account.phone_number.clone(),
            avatar_url: account.avatar_url.clone(),
            role: account.role,
            barbershop_id: account.barbershop_id,
            is_active: account.is_active,
            created_at: account.created_at,
            updated_at: account.updated_at,
        }
    }
}

/// Command to create an account directly (admin and barber management).
#[derive(Debug)]
pub struct CreateAccountCommand {
    pub email: EmailAddress,
    pub password: Password,
    pub name: DisplayName,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub role: Role,
    pub barbershop_id: Option<BarbershopId>,
}

/// Partial account update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateAccountCommand {
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
    pub name: Option<DisplayName>,
    pub phone_number: Option<String>,
    pub avatar_url: Option<String>,
    pub barbershop_id: Option<BarbershopId>,
    pub is_active: Option<bool>,
}

/// Listing filter; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccountFilter {
    pub role: Option<Role>,
    pub barbershop_id: Option<BarbershopId>,
}

impl AccountFilter {
    pub fn matches(&self, account: &Account) -> bool {
        self.role.map_or(true, |role| account.role == role)
            && self
                .barbershop_id
                .map_or(true, |id| account.barbershop_id == Some(id))
    }
}
