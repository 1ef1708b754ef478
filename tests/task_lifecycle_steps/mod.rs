//! Step definitions for task lifecycle scenarios.

pub mod given;
pub mod then;
pub mod world;
