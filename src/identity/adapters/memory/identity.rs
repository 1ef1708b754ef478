//! In-memory repository for users and role profiles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::{
    domain::{Benefactor, Charity, TokenDigest, User, UserId, Username},
    ports::{IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult, ProfileKind},
};

/// Thread-safe in-memory identity repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdentityRepository {
    state: Arc<RwLock<InMemoryIdentityState>>,
}

#[derive(Debug, Default)]
struct InMemoryIdentityState {
    users: HashMap<UserId, User>,
    username_index: HashMap<Username, UserId>,
    token_index: HashMap<TokenDigest, UserId>,
    benefactors: HashMap<UserId, Benefactor>,
    charities: HashMap<UserId, Charity>,
}

impl InMemoryIdentityRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> IdentityRepositoryResult<RwLockReadGuard<'_, InMemoryIdentityState>> {
        self.state.read().map_err(|err| {
            IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> IdentityRepositoryResult<RwLockWriteGuard<'_, InMemoryIdentityState>> {
        self.state.write().map_err(|err| {
            IdentityRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

#[async_trait]
impl IdentityRepository for InMemoryIdentityRepository {
    async fn store_user(&self, user: &User, token: &TokenDigest) -> IdentityRepositoryResult<()> {
        let mut state = self.write()?;
        if state.username_index.contains_key(user.username()) {
            return Err(IdentityRepositoryError::DuplicateUsername(
                user.username().clone(),
            ));
        }

        state
            .username_index
            .insert(user.username().clone(), user.id());
        state.token_index.insert(token.clone(), user.id());
        state.users.insert(user.id(), user.clone());
        Ok(())
    }

    async fn find_user_by_token(
        &self,
        token: &TokenDigest,
    ) -> IdentityRepositoryResult<Option<User>> {
        let state = self.read()?;
        Ok(state
            .token_index
            .get(token)
            .and_then(|user_id| state.users.get(user_id))
            .cloned())
    }

    async fn store_benefactor(&self, benefactor: &Benefactor) -> IdentityRepositoryResult<()> {
        let mut state = self.write()?;
        let user_id = benefactor.user_id();
        if !state.users.contains_key(&user_id) {
            return Err(IdentityRepositoryError::UnknownUser(user_id));
        }
        if state.benefactors.contains_key(&user_id) {
            return Err(IdentityRepositoryError::DuplicateProfile {
                user_id,
                kind: ProfileKind::Benefactor,
            });
        }
        state.benefactors.insert(user_id, benefactor.clone());
        Ok(())
    }

    async fn store_charity(&self, charity: &Charity) -> IdentityRepositoryResult<()> {
        let mut state = self.write()?;
        let user_id = charity.user_id();
        if !state.users.contains_key(&user_id) {
            return Err(IdentityRepositoryError::UnknownUser(user_id));
        }
        if state.charities.contains_key(&user_id) {
            return Err(IdentityRepositoryError::DuplicateProfile {
                user_id,
                kind: ProfileKind::Charity,
            });
        }
        state.charities.insert(user_id, charity.clone());
        Ok(())
    }

    async fn find_benefactor_by_user(
        &self,
        user_id: UserId,
    ) -> IdentityRepositoryResult<Option<Benefactor>> {
        Ok(self.read()?.benefactors.get(&user_id).cloned())
    }

    async fn find_charity_by_user(
        &self,
        user_id: UserId,
    ) -> IdentityRepositoryResult<Option<Charity>> {
        Ok(self.read()?.charities.get(&user_id).cloned())
    }
}
