use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::optional_text;
use crate::domain::account::models::required_text;
use crate::domain::account::models::EmailAddress;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::client::errors::ClientError;
use crate::domain::client::errors::ClientIdError;

const MAX_NAME_LENGTH: usize = 100;
const MAX_PHONE_LENGTH: usize = 30;
const MAX_NOTES_LENGTH: usize = 2000;

/// Customer of a barbershop. Not an account: clients never sign in.
#[derive(Debug, Clone)]
pub struct Client {
    pub id: ClientId,
    pub barbershop_id: BarbershopId,
    pub name: String,
    pub lastname: String,
    pub phone: String,
    pub email: Option<EmailAddress>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Client {
    pub fn new(barbershop_id: BarbershopId, command: CreateClientCommand) -> Self {
        let now = Utc::now();
        Self {
            id: ClientId::new(),
            barbershop_id,
            name: command.name,
            lastname: command.lastname,
            phone: command.phone,
            email: command.email,
            notes: command.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClientId(pub Uuid);

impl ClientId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, ClientIdError> {
        Uuid::parse_str(s)
            .map(ClientId)
            .map_err(|e| ClientIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for ClientId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn email(value: Option<String>) -> Result<Option<EmailAddress>, ClientError> {
    match value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        Some(v) => Ok(Some(EmailAddress::new(v)?)),
        None => Ok(None),
    }
}

/// Validated data for a new client.
#[derive(Debug)]
pub struct CreateClientCommand {
    pub name: String,
    pub lastname: String,
    pub phone: String,
    pub email: Option<EmailAddress>,
    pub notes: Option<String>,
}

impl CreateClientCommand {
    /// # Errors
    /// * `InvalidField` - Name, lastname or phone blank or too long
    /// * `InvalidEmail` - Email present but malformed
    pub fn new(
        name: String,
        lastname: String,
        phone: String,
        email_address: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            name: required_text("name", name, MAX_NAME_LENGTH)?,
            lastname: required_text("lastname", lastname, MAX_NAME_LENGTH)?,
            phone: required_text("phone", phone, MAX_PHONE_LENGTH)?,
            email: email(email_address)?,
            notes: optional_text("notes", notes, MAX_NOTES_LENGTH)?,
        })
    }
}

/// Partial client update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateClientCommand {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub phone: Option<String>,
    pub email: Option<EmailAddress>,
    pub notes: Option<String>,
}

impl UpdateClientCommand {
    /// # Errors
    /// * `InvalidField` - A provided field is blank or too long
    /// * `InvalidEmail` - Email present but malformed
    pub fn new(
        name: Option<String>,
        lastname: Option<String>,
        phone: Option<String>,
        email_address: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, ClientError> {
        Ok(Self {
            name: name
                .map(|v| required_text("name", v, MAX_NAME_LENGTH))
                .transpose()?,
            lastname: lastname
                .map(|v| required_text("lastname", v, MAX_NAME_LENGTH))
                .transpose()?,
            phone: phone
                .map(|v| required_text("phone", v, MAX_PHONE_LENGTH))
                .transpose()?,
            email: email(email_address)?,
            notes: optional_text("notes", notes, MAX_NOTES_LENGTH)?,
        })
    }
}
