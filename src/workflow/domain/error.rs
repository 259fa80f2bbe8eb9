//! Error types for workflow domain validation and state transitions.

use super::RequestState;
use thiserror::Error;

/// Errors raised by the pure validation rules.
///
/// Validation failures are always recoverable: they are reported to the user
/// who triggered them and never terminate a request.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The chosen approver cannot approve requests.
    #[error("invalid approver: {0}")]
    InvalidApprover(String),

    /// The estimate is not a non-negative decimal number of hours.
    #[error("invalid estimate '{0}', expected a non-negative number of hours")]
    InvalidEstimate(String),

    /// The date is not a valid `DD/MM/YYYY` calendar date.
    #[error("invalid date '{0}', expected DD/MM/YYYY")]
    InvalidDateFormat(String),

    /// The end date precedes the start date.
    #[error("end date {end} precedes start date {start}")]
    InvalidDateRange {
        /// Requested start date.
        start: chrono::NaiveDate,
        /// Requested end date.
        end: chrono::NaiveDate,
    },

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// A rejection was attempted without a justification.
    #[error("a rejection requires a non-empty reason")]
    EmptyRejectionReason,
}

/// Errors raised by the task request state machine.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WorkflowDomainError {
    /// The event is not legal in the request's current state.
    #[error("cannot {action} a request in state {state}")]
    InvalidTransition {
        /// State the request was in when the event arrived.
        state: RequestState,
        /// Human-readable name of the attempted event.
        action: &'static str,
    },

    /// Details were submitted before a project was selected.
    #[error("no project has been selected for this request")]
    MissingProject,

    /// A summary or backend payload was requested before details existed.
    #[error("no task details have been submitted for this request")]
    MissingDetails,

    /// Someone other than the designated approver tried to resolve the
    /// request.
    #[error("'{actor}' is not the designated approver for this request")]
    UnauthorizedActor {
        /// Display name of the actor whose action was refused.
        actor: String,
    },
}
