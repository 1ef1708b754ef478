//! Descriptive task attributes.
//!
//! None of these values take part in lifecycle decisions; they are validated
//! once at creation and carried along unchanged.

use super::TaskDomainError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a task title, matching the `VARCHAR(60)` column.
const MAX_TITLE_LENGTH: usize = 60;

/// Non-blank task title.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Creates a validated title.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`] for blank input or
    /// [`TaskDomainError::TitleTooLong`] past 60 characters.
    pub fn new(value: impl Into<String>) -> Result<Self, TaskDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        let length = normalized.chars().count();
        if length > MAX_TITLE_LENGTH {
            return Err(TaskDomainError::TitleTooLong(length));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the title as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Gender restriction on who may take a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenderLimit {
    /// Male benefactors only.
    #[serde(rename = "M")]
    Male,
    /// Female benefactors only.
    #[serde(rename = "F")]
    Female,
    /// Anyone.
    #[serde(rename = "MF")]
    Any,
}

impl GenderLimit {
    /// Returns the canonical storage code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "M",
            Self::Female => "F",
            Self::Any => "MF",
        }
    }
}

impl TryFrom<&str> for GenderLimit {
    type Error = TaskDomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_uppercase().as_str() {
            "M" => Ok(Self::Male),
            "F" => Ok(Self::Female),
            "MF" => Ok(Self::Any),
            _ => Err(TaskDomainError::InvalidGenderLimit(value.to_owned())),
        }
    }
}

/// Optional inclusive age bounds for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AgeLimits {
    from: Option<u16>,
    to: Option<u16>,
}

impl AgeLimits {
    /// Creates validated age limits.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::InvalidAgeRange`] when both bounds are set
    /// and `from > to`.
    pub const fn new(from: Option<u16>, to: Option<u16>) -> Result<Self, TaskDomainError> {
        if let (Some(lower), Some(upper)) = (from, to) {
            if lower > upper {
                return Err(TaskDomainError::InvalidAgeRange {
                    from: lower,
                    to: upper,
                });
            }
        }
        Ok(Self { from, to })
    }

    /// Returns the lower bound.
    #[must_use]
    pub const fn lower(self) -> Option<u16> {
        self.from
    }

    /// Returns the upper bound.
    #[must_use]
    pub const fn upper(self) -> Option<u16> {
        self.to
    }
}

/// Descriptive attributes of a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDetails {
    title: TaskTitle,
    description: Option<String>,
    date: Option<NaiveDate>,
    age_limits: AgeLimits,
    gender_limit: Option<GenderLimit>,
}

impl TaskDetails {
    /// Creates details with only a title.
    #[must_use]
    pub const fn new(title: TaskTitle) -> Self {
        Self {
            title,
            description: None,
            date: None,
            age_limits: AgeLimits {
                from: None,
                to: None,
            },
            gender_limit: None,
        }
    }

    /// Sets the description. Blank descriptions are dropped.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        let value = description.into();
        self.description = if value.trim().is_empty() {
            None
        } else {
            Some(value)
        };
        self
    }

    /// Sets the date the task takes place.
    #[must_use]
    pub const fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Sets the age limits.
    #[must_use]
    pub const fn with_age_limits(mut self, age_limits: AgeLimits) -> Self {
        self.age_limits = age_limits;
        self
    }

    /// Sets the gender limit.
    #[must_use]
    pub const fn with_gender_limit(mut self, gender_limit: GenderLimit) -> Self {
        self.gender_limit = Some(gender_limit);
        self
    }

    /// Returns the title.
    #[must_use]
    pub const fn title(&self) -> &TaskTitle {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the date, if any.
    #[must_use]
    pub const fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// Returns the age limits.
    #[must_use]
    pub const fn age_limits(&self) -> AgeLimits {
        self.age_limits
    }

    /// Returns the gender limit, if any.
    #[must_use]
    pub const fn gender_limit(&self) -> Option<GenderLimit> {
        self.gender_limit
    }
}
