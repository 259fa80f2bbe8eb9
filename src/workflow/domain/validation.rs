//! Validation rules guarding workflow state transitions.
//!
//! Each rule is a pure function with no side effects; the workflow engine
//! calls these before any state transition or external call. Rules return
//! `Ok` on success or a specific [`ValidationError`] on failure.

use super::{Actor, EstimateHours, ValidationError};

/// Validates a candidate approver.
///
/// Automated accounts cannot approve requests. A requester naming themselves
/// as approver is accepted; the gate only requires a mentionable human
/// identity.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidApprover`] when the candidate is a bot.
pub fn validate_approver(candidate: &Actor, _requester: &Actor) -> Result<(), ValidationError> {
    if candidate.is_bot() {
        return Err(ValidationError::InvalidApprover(format!(
            "'{}' is an automated account",
            candidate.display_name()
        )));
    }
    Ok(())
}

/// Validates a raw estimate string.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEstimate`] when the input is not a
/// non-negative decimal number of hours.
pub fn validate_estimate(raw: &str) -> Result<EstimateHours, ValidationError> {
    EstimateHours::parse(raw)
}

/// Validates a task title.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyTitle`] when the title is blank.
pub fn validate_title(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyTitle);
    }
    Ok(())
}

/// Validates a rejection justification.
///
/// # Errors
///
/// Returns [`ValidationError::EmptyRejectionReason`] when the reason is
/// blank.
pub fn validate_rejection_reason(raw: &str) -> Result<(), ValidationError> {
    if raw.trim().is_empty() {
        return Err(ValidationError::EmptyRejectionReason);
    }
    Ok(())
}
