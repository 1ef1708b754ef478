//! Port contracts for identity persistence.

pub mod repository;

pub use repository::{
    IdentityRepository, IdentityRepositoryError, IdentityRepositoryResult, ProfileKind,
};
