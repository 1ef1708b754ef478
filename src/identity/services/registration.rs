//! Service layer for user registration, authentication, and role lookup.

use crate::identity::{
    domain::{
        Actor, AuthToken, Benefactor, Charity, CharityName, Experience, FreeTimePerWeek,
        IdentityDomainError, RegistrationNumber, User, Username,
    },
    ports::{IdentityRepository, IdentityRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for registering a benefactor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RegisterBenefactorRequest {
    experience: i64,
    free_time_per_week: i64,
}

impl RegisterBenefactorRequest {
    /// Creates a request with the default beginner level and no free time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            experience: 0,
            free_time_per_week: 0,
        }
    }

    /// Sets the raw experience level.
    #[must_use]
    pub const fn with_experience(mut self, experience: i64) -> Self {
        self.experience = experience;
        self
    }

    /// Sets the raw weekly availability in hours.
    #[must_use]
    pub const fn with_free_time_per_week(mut self, hours: i64) -> Self {
        self.free_time_per_week = hours;
        self
    }
}

/// Request payload for registering a charity profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterCharityRequest {
    name: String,
    reg_number: String,
}

impl RegisterCharityRequest {
    /// Creates a request with the required charity fields.
    #[must_use]
    pub fn new(name: impl Into<String>, reg_number: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            reg_number: reg_number.into(),
        }
    }
}

/// Service-level errors for identity operations.
#[derive(Debug, Error)]
pub enum IdentityServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] IdentityDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] IdentityRepositoryError),
    /// The presented token does not belong to any user.
    #[error("authentication credentials were not provided or are invalid")]
    Unauthenticated,
}

/// Result type for identity service operations.
pub type IdentityServiceResult<T> = Result<T, IdentityServiceError>;

/// Registration and authentication service.
pub struct IdentityService<R, C>
where
    R: IdentityRepository + ?Sized,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for IdentityService<R, C>
where
    R: IdentityRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> IdentityService<R, C>
where
    R: IdentityRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new identity service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Registers a user and issues their bearer token.
    ///
    /// The plaintext token is returned once and never stored.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] for an invalid username or
    /// [`IdentityServiceError::Repository`] when it is already taken.
    pub async fn register_user(
        &self,
        username: impl Into<String>,
    ) -> IdentityServiceResult<(User, AuthToken)> {
        let user = User::new(Username::new(username)?, &*self.clock);
        let token = AuthToken::generate();
        self.repository.store_user(&user, &token.digest()).await?;
        info!(user_id = %user.id(), username = %user.username(), "user registered");
        Ok((user, token))
    }

    /// Resolves a presented bearer token to its user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Unauthenticated`] for unknown tokens.
    pub async fn authenticate(&self, token: &AuthToken) -> IdentityServiceResult<User> {
        let user = self.repository.find_user_by_token(&token.digest()).await?;
        user.ok_or_else(|| {
            debug!("rejected unknown bearer token");
            IdentityServiceError::Unauthenticated
        })
    }

    /// Creates the benefactor profile of a user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] when a field is out of range
    /// or [`IdentityServiceError::Repository`] when the profile exists.
    pub async fn register_benefactor(
        &self,
        user: &User,
        request: RegisterBenefactorRequest,
    ) -> IdentityServiceResult<Benefactor> {
        let experience = Experience::try_from(request.experience)?;
        let free_time = FreeTimePerWeek::try_from(request.free_time_per_week)?;
        let benefactor = Benefactor::new(user.id(), experience, free_time, &*self.clock);
        self.repository.store_benefactor(&benefactor).await?;
        info!(user_id = %user.id(), benefactor_id = %benefactor.id(), "benefactor registered");
        Ok(benefactor)
    }

    /// Creates the charity profile of a user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Domain`] for an invalid name or
    /// registration number, or [`IdentityServiceError::Repository`] when the
    /// profile exists.
    pub async fn register_charity(
        &self,
        user: &User,
        request: RegisterCharityRequest,
    ) -> IdentityServiceResult<Charity> {
        let name = CharityName::new(request.name)?;
        let reg_number = RegistrationNumber::new(request.reg_number)?;
        let charity = Charity::new(user.id(), name, reg_number, &*self.clock);
        self.repository.store_charity(&charity).await?;
        info!(user_id = %user.id(), charity_id = %charity.id(), "charity registered");
        Ok(charity)
    }

    /// Resolves the role profiles held by a user.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityServiceError::Repository`] when a lookup fails.
    pub async fn resolve_actor(&self, user: &User) -> IdentityServiceResult<Actor> {
        let mut actor = Actor::new(user.id());
        if let Some(benefactor) = self.repository.find_benefactor_by_user(user.id()).await? {
            actor = actor.with_benefactor(benefactor.id());
        }
        if let Some(charity) = self.repository.find_charity_by_user(user.id()).await? {
            actor = actor.with_charity(charity.id());
        }
        Ok(actor)
    }
}
