//! Port contracts for the approval workflow.
//!
//! Ports define infrastructure-agnostic interfaces between the workflow
//! engine and the chat client rendering the interaction.

pub mod presentation;

pub use presentation::{
    ApprovalAction, Decision, Notification, Presentation, PresentationError, PresentationResult,
};
