//! Repository port for users and their role profiles.

use crate::identity::domain::{Benefactor, Charity, TokenDigest, User, UserId, Username};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Result type for identity repository operations.
pub type IdentityRepositoryResult<T> = Result<T, IdentityRepositoryError>;

/// Identity persistence contract.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Stores a new user with the digest of their bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateUsername`] when the
    /// username is taken.
    async fn store_user(&self, user: &User, token: &TokenDigest) -> IdentityRepositoryResult<()>;

    /// Finds the user owning the given token digest.
    async fn find_user_by_token(&self, token: &TokenDigest)
    -> IdentityRepositoryResult<Option<User>>;

    /// Stores a benefactor profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateProfile`] when the user
    /// already has one, or [`IdentityRepositoryError::UnknownUser`] when the
    /// user does not exist.
    async fn store_benefactor(&self, benefactor: &Benefactor) -> IdentityRepositoryResult<()>;

    /// Stores a charity profile.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityRepositoryError::DuplicateProfile`] when the user
    /// already has one, or [`IdentityRepositoryError::UnknownUser`] when the
    /// user does not exist.
    async fn store_charity(&self, charity: &Charity) -> IdentityRepositoryResult<()>;

    /// Finds the benefactor profile of a user.
    async fn find_benefactor_by_user(
        &self,
        user_id: UserId,
    ) -> IdentityRepositoryResult<Option<Benefactor>>;

    /// Finds the charity profile of a user.
    async fn find_charity_by_user(
        &self,
        user_id: UserId,
    ) -> IdentityRepositoryResult<Option<Charity>>;
}

/// Role profile kinds a user can register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileKind {
    /// Benefactor profile.
    Benefactor,
    /// Charity profile.
    Charity,
}

impl fmt::Display for ProfileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Benefactor => f.write_str("benefactor"),
            Self::Charity => f.write_str("charity"),
        }
    }
}

/// Errors returned by identity repository implementations.
#[derive(Debug, Clone, Error)]
pub enum IdentityRepositoryError {
    /// The username is already registered.
    #[error("username already registered: {0}")]
    DuplicateUsername(Username),

    /// The user already holds a profile of this kind.
    #[error("user {user_id} already has a {kind} profile")]
    DuplicateProfile {
        /// User holding the existing profile.
        user_id: UserId,
        /// Kind of the duplicated profile.
        kind: ProfileKind,
    },

    /// The referenced user does not exist.
    #[error("user not found: {0}")]
    UnknownUser(UserId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IdentityRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
