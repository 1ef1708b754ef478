//! Charity profile aggregate and its validated fields.

use super::{CharityId, IdentityDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// Maximum length for a charity name, matching the `VARCHAR(50)` column.
const MAX_NAME_LENGTH: usize = 50;

/// Number of digits in a charity registration number.
const REG_NUMBER_LENGTH: usize = 10;

/// Display name of a charity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharityName(String);

impl CharityName {
    /// Creates a validated charity name.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::EmptyCharityName`] for blank input or
    /// [`IdentityDomainError::CharityNameTooLong`] past 50 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(IdentityDomainError::EmptyCharityName);
        }
        let length = normalized.chars().count();
        if length > MAX_NAME_LENGTH {
            return Err(IdentityDomainError::CharityNameTooLong(length));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CharityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Official ten-digit charity registration number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    /// Creates a validated registration number.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityDomainError::InvalidRegistrationNumber`] unless the
    /// trimmed value is exactly ten ASCII digits.
    pub fn new(value: impl Into<String>) -> Result<Self, IdentityDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let is_valid = normalized.len() == REG_NUMBER_LENGTH
            && normalized.chars().all(|c| c.is_ascii_digit());
        if !is_valid {
            return Err(IdentityDomainError::InvalidRegistrationNumber(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the registration number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Charity profile bound to exactly one owning user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charity {
    id: CharityId,
    user_id: UserId,
    name: CharityName,
    reg_number: RegistrationNumber,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted charity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedCharityData {
    /// Persisted charity identifier.
    pub id: CharityId,
    /// Owning user.
    pub user_id: UserId,
    /// Persisted display name.
    pub name: CharityName,
    /// Persisted registration number.
    pub reg_number: RegistrationNumber,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Charity {
    /// Creates a charity profile owned by the given user.
    #[must_use]
    pub fn new(
        user_id: UserId,
        name: CharityName,
        reg_number: RegistrationNumber,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: CharityId::new(),
            user_id,
            name,
            reg_number,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a charity from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedCharityData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            name: data.name,
            reg_number: data.reg_number,
            created_at: data.created_at,
        }
    }

    /// Returns the charity identifier.
    #[must_use]
    pub const fn id(&self) -> CharityId {
        self.id
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the display name.
    #[must_use]
    pub const fn name(&self) -> &CharityName {
        &self.name
    }

    /// Returns the registration number.
    #[must_use]
    pub const fn reg_number(&self) -> &RegistrationNumber {
        &self.reg_number
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
