//! Domain model for the approval workflow.
//!
//! The workflow domain models a single task request's state machine, the
//! actors on either side of the approval gate, the user-facing duration and
//! date formats, and the validation rules guarding every state transition.
//! Infrastructure concerns stay outside the domain boundary.

mod actor;
mod details;
mod error;
mod ids;
mod request;
pub mod schedule;
pub mod validation;

pub use actor::{Actor, ActorId};
pub use details::{TaskDetails, TaskDraftForm};
pub use error::{ValidationError, WorkflowDomainError};
pub use ids::RequestId;
pub use request::{RequestState, RequestSummary, TaskRequest};
pub use schedule::EstimateHours;
