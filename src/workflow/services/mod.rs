//! Application services orchestrating the approval workflow.

mod approval;

pub use approval::{
    ApprovalWorkflowService, Resolution, SELECTION_PAGE_SIZE, WorkflowError, WorkflowResult,
};
