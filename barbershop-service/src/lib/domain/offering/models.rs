use std::fmt;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::models::optional_text;
use crate::domain::account::models::required_text;
use crate::domain::barbershop::models::BarbershopId;
use crate::domain::offering::errors::OfferingError;
use crate::domain::offering::errors::OfferingIdError;

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 1000;
const MAX_URL_LENGTH: usize = 2048;

/// Catalog entry of a barbershop (a haircut, a shave, ...).
///
/// Prices are integer cents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offering {
    pub id: OfferingId,
    pub barbershop_id: BarbershopId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Offering {
    pub fn new(command: CreateOfferingCommand) -> Self {
        let now = Utc::now();
        Self {
            id: OfferingId::new(),
            barbershop_id: command.barbershop_id,
            name: command.name,
            description: command.description,
            price_cents: command.price_cents,
            duration_minutes: command.duration_minutes,
            active: command.active,
            image_url: command.image_url,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OfferingId(pub Uuid);

impl OfferingId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, OfferingIdError> {
        Uuid::parse_str(s)
            .map(OfferingId)
            .map_err(|e| OfferingIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for OfferingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for OfferingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

fn price(cents: i64) -> Result<i64, OfferingError> {
    if cents < 0 {
        Err(OfferingError::NegativePrice(cents))
    } else {
        Ok(cents)
    }
}

fn duration(minutes: i32) -> Result<i32, OfferingError> {
    if minutes < 1 {
        Err(OfferingError::InvalidDuration(minutes))
    } else {
        Ok(minutes)
    }
}

/// Validated data for a new catalog entry.
#[derive(Debug)]
pub struct CreateOfferingCommand {
    pub barbershop_id: BarbershopId,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub duration_minutes: i32,
    pub active: bool,
    pub image_url: Option<String>,
}

impl CreateOfferingCommand {
    /// New entries are active unless stated otherwise.
    ///
    /// # Errors
    /// * `InvalidField` - Name blank or text too long
    /// * `NegativePrice` - Price below zero
    /// * `InvalidDuration` - Duration below one minute
    pub fn new(
        barbershop_id: BarbershopId,
        name: String,
        description: Option<String>,
        price_cents: i64,
        duration_minutes: i32,
        active: Option<bool>,
        image_url: Option<String>,
    ) -> Result<Self, OfferingError> {
        Ok(Self {
            barbershop_id,
            name: required_text("name", name, MAX_NAME_LENGTH)?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
            price_cents: price(price_cents)?,
            duration_minutes: duration(duration_minutes)?,
            active: active.unwrap_or(true),
            image_url: optional_text("image_url", image_url, MAX_URL_LENGTH)?,
        })
    }
}

/// Partial catalog update; only provided fields change.
#[derive(Debug, Default)]
pub struct UpdateOfferingCommand {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub duration_minutes: Option<i32>,
    pub active: Option<bool>,
    pub image_url: Option<String>,
}

impl UpdateOfferingCommand {
    /// Applies the creation rules to the provided fields only.
    pub fn new(
        name: Option<String>,
        description: Option<String>,
        price_cents: Option<i64>,
        duration_minutes: Option<i32>,
        active: Option<bool>,
        image_url: Option<String>,
    ) -> Result<Self, OfferingError> {
        Ok(Self {
            name: name
                .map(|v| required_text("name", v, MAX_NAME_LENGTH))
                .transpose()?,
            description: optional_text("description", description, MAX_DESCRIPTION_LENGTH)?,
            price_cents: price_cents.map(price).transpose()?,
            duration_minutes: duration_minutes.map(duration).transpose()?,
            active,
            image_url: optional_text("image_url", image_url, MAX_URL_LENGTH)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_defaults_to_active() {
        let command = CreateOfferingCommand::new(
            BarbershopId::new(),
            "Classic cut".to_string(),
            None,
            1500,
            30,
            None,
            None,
        )
        .unwrap();

        assert!(command.active);
        assert_eq!(command.price_cents, 1500);
    }

    #[test]
    fn test_create_validates_price_and_duration() {
        let negative = CreateOfferingCommand::new(
            BarbershopId::new(),
            "Shave".to_string(),
            None,
            -1,
            15,
            None,
            None,
        );
        assert!(matches!(negative, Err(OfferingError::NegativePrice(-1))));

        let zero_minutes = CreateOfferingCommand::new(
            BarbershopId::new(),
            "Shave".to_string(),
            None,
            0,
            0,
            None,
            None,
        );
        assert!(matches!(zero_minutes, Err(OfferingError::InvalidDuration(0))));
    }

    #[test]
    fn test_update_only_checks_provided_fields() {
        let command = UpdateOfferingCommand::new(None, None, Some(0), None, None, None).unwrap();
        assert_eq!(command.price_cents, Some(0));
        assert!(command.name.is_none());

        let blank_name =
            UpdateOfferingCommand::new(Some(" ".to_string()), None, None, None, None, None);
        assert!(matches!(blank_name, Err(OfferingError::InvalidField(_))));
    }
}
