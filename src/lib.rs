//! Charity hub: a task matching backend for charities and benefactors.
//!
//! Charities post tasks, benefactors request them, and the owning charity
//! accepts or rejects each request before the task is marked done.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (in-memory, `PostgreSQL`)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle state machine, listing, and access checks
//! - [`identity`]: Users, token authentication, and role profiles
//! - [`http`]: axum router exposing both over JSON
//! - [`config`]: Command-line and environment configuration
//! - [`db`]: Shared `PostgreSQL` pool and schema

pub mod config;
pub mod db;
pub mod http;
pub mod identity;
pub mod task;
