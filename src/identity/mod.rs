//! Identity and role resolution for charity hub callers.
//!
//! Users authenticate with an opaque bearer token. A user may hold a
//! benefactor profile, a charity profile, or both; each profile is created
//! once at registration and resolves to exactly one record per user. The
//! module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
