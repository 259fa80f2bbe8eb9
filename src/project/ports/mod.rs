//! Port contracts for the project-management backend boundary.
//!
//! Ports define infrastructure-agnostic interfaces used by the cache and the
//! workflow engine.

pub mod client;

pub use client::{BackendError, BackendResult, ProjectBackend};
