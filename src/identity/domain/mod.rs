//! Domain model for users, benefactors, and charities.

mod actor;
mod benefactor;
mod charity;
mod error;
mod ids;
mod token;
mod user;

pub use actor::Actor;
pub use benefactor::{Benefactor, Experience, FreeTimePerWeek, PersistedBenefactorData};
pub use charity::{Charity, CharityName, PersistedCharityData, RegistrationNumber};
pub use error::IdentityDomainError;
pub use ids::{BenefactorId, CharityId, UserId};
pub use token::{AuthToken, TokenDigest};
pub use user::{User, Username};
