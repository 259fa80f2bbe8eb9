//! Workflow unit tests.

mod request_tests;
mod service_tests;
