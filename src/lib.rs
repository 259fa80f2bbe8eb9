//! Taskgate: chat-mediated task creation with a human approval gate.
//!
//! This crate mediates task-creation requests between a chat client and a
//! project-management backend. A requester picks a project and fills in task
//! details; a designated approver accepts or rejects the request; on
//! acceptance the task is created in the backend.
//!
//! # Architecture
//!
//! Taskgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (chat client, backend
//!   API, in-memory test doubles)
//!
//! # Modules
//!
//! - [`project`]: Project-management backend boundary and project list cache
//! - [`workflow`]: Request/approval workflow engine
//! - [`settings`]: Process configuration consumed by adapters

pub mod project;
pub mod settings;
pub mod workflow;
