//! Adapter implementations for the project-management backend ports.

pub mod memory;
