//! Application services for registration and caller resolution.

mod registration;

pub use registration::{
    IdentityService, IdentityServiceError, IdentityServiceResult, RegisterBenefactorRequest,
    RegisterCharityRequest,
};
