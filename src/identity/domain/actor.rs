//! Resolved caller identity with its derived roles.

use super::{BenefactorId, CharityId, UserId};

/// Authenticated caller together with the profiles they hold.
///
/// A user may be a benefactor, a charity owner, both, or neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    user_id: UserId,
    benefactor_id: Option<BenefactorId>,
    charity_id: Option<CharityId>,
}

impl Actor {
    /// Creates an actor holding no role profiles.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            benefactor_id: None,
            charity_id: None,
        }
    }

    /// Attaches a benefactor profile.
    #[must_use]
    pub const fn with_benefactor(mut self, benefactor_id: BenefactorId) -> Self {
        self.benefactor_id = Some(benefactor_id);
        self
    }

    /// Attaches a charity profile.
    #[must_use]
    pub const fn with_charity(mut self, charity_id: CharityId) -> Self {
        self.charity_id = Some(charity_id);
        self
    }

    /// Returns the authenticated user.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the benefactor profile, if any.
    #[must_use]
    pub const fn benefactor_id(&self) -> Option<BenefactorId> {
        self.benefactor_id
    }

    /// Returns the charity profile, if any.
    #[must_use]
    pub const fn charity_id(&self) -> Option<CharityId> {
        self.charity_id
    }
}
