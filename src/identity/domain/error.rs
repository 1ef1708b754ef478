//! Error types for identity domain validation.

use thiserror::Error;

/// Errors returned while constructing identity domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityDomainError {
    /// The username is empty after trimming.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The username exceeds the persisted column width.
    #[error("username is {0} characters long, at most 150 are allowed")]
    UsernameTooLong(usize),

    /// The username contains whitespace.
    #[error("username '{0}' must not contain whitespace")]
    InvalidUsername(String),

    /// The experience level is outside the known range.
    #[error("invalid experience level {0}, expected 0, 1 or 2")]
    InvalidExperience(i64),

    /// Weekly free time is outside the hours in a week.
    #[error("free time per week must be between 0 and 168 hours, got {0}")]
    FreeTimeOutOfRange(i64),

    /// The charity name is empty after trimming.
    #[error("charity name must not be empty")]
    EmptyCharityName,

    /// The charity name exceeds the persisted column width.
    #[error("charity name is {0} characters long, at most 50 are allowed")]
    CharityNameTooLong(usize),

    /// The registration number is not exactly ten digits.
    #[error("invalid registration number '{0}', expected exactly 10 digits")]
    InvalidRegistrationNumber(String),
}
