//! Adapter implementations for the workflow ports.

pub mod memory;
