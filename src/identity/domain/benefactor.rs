//! Benefactor profile aggregate.

use super::{BenefactorId, IdentityDomainError, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;

/// Self-reported experience level of a benefactor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Experience {
    /// No prior volunteering experience.
    #[default]
    Beginner,
    /// Some prior volunteering experience.
    Intermediate,
    /// Extensive prior volunteering experience.
    Expert,
}

impl Experience {
    /// Returns the numeric level used on the wire and in storage.
    #[must_use]
    pub const fn level(self) -> i16 {
        match self {
            Self::Beginner => 0,
            Self::Intermediate => 1,
            Self::Expert => 2,
        }
    }
}

impl TryFrom<i64> for Experience {
    type Error = IdentityDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Beginner),
            1 => Ok(Self::Intermediate),
            2 => Ok(Self::Expert),
            _ => Err(IdentityDomainError::InvalidExperience(value)),
        }
    }
}

/// Hours per week a benefactor can dedicate to tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FreeTimePerWeek(u8);

impl FreeTimePerWeek {
    /// Number of hours in a week.
    const MAX_HOURS: i64 = 168;

    /// Returns the number of hours.
    #[must_use]
    pub const fn hours(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for FreeTimePerWeek {
    type Error = IdentityDomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if !(0..=Self::MAX_HOURS).contains(&value) {
            return Err(IdentityDomainError::FreeTimeOutOfRange(value));
        }
        u8::try_from(value)
            .map(Self)
            .map_err(|_| IdentityDomainError::FreeTimeOutOfRange(value))
    }
}

/// Benefactor profile bound to exactly one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Benefactor {
    id: BenefactorId,
    user_id: UserId,
    experience: Experience,
    free_time_per_week: FreeTimePerWeek,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted benefactor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBenefactorData {
    /// Persisted benefactor identifier.
    pub id: BenefactorId,
    /// Owning user.
    pub user_id: UserId,
    /// Persisted experience level.
    pub experience: Experience,
    /// Persisted weekly availability.
    pub free_time_per_week: FreeTimePerWeek,
    /// Persisted registration timestamp.
    pub created_at: DateTime<Utc>,
}

impl Benefactor {
    /// Creates a benefactor profile for the given user.
    #[must_use]
    pub fn new(
        user_id: UserId,
        experience: Experience,
        free_time_per_week: FreeTimePerWeek,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: BenefactorId::new(),
            user_id,
            experience,
            free_time_per_week,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a benefactor from persisted storage.
    #[must_use]
    pub const fn from_persisted(data: PersistedBenefactorData) -> Self {
        Self {
            id: data.id,
            user_id: data.user_id,
            experience: data.experience,
            free_time_per_week: data.free_time_per_week,
            created_at: data.created_at,
        }
    }

    /// Returns the benefactor identifier.
    #[must_use]
    pub const fn id(&self) -> BenefactorId {
        self.id
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the experience level.
    #[must_use]
    pub const fn experience(&self) -> Experience {
        self.experience
    }

    /// Returns the weekly availability.
    #[must_use]
    pub const fn free_time_per_week(&self) -> FreeTimePerWeek {
        self.free_time_per_week
    }

    /// Returns the registration timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
