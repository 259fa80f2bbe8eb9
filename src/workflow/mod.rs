//! Request/approval workflow engine.
//!
//! This module owns the lifecycle of a single task request from initiation
//! through delivery to an approver through terminal resolution: approval
//! (with backend submission), rejection, or failure. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
