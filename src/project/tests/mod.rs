//! Unit tests for the project module.
//!
//! Tests are organised by concern: domain value types, wire payload shape,
//! and cache refresh/pagination behaviour.

mod clock;
mod domain_tests;
