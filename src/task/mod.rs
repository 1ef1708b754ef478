//! Task lifecycle management.
//!
//! Charities post tasks, benefactors request them, and the owning charity
//! accepts or rejects each request before the task is marked done. The
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
