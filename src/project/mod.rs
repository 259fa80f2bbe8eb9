//! Project-management backend boundary.
//!
//! This module owns everything taskgate knows about the external
//! project-management system: the value types crossing that boundary, the
//! narrow client facade the workflow consumes, and the time-bounded project
//! list cache. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - The project list cache in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
