//! User-facing text for the node dialogs.

use crate::domain::models::NodeValidationError;

/// Message catalog shown inline by the add-node dialogs
#[derive(Debug, Clone, PartialEq)]
pub struct NodeDialogMessages {
    pub required: String,
    pub chart_not_found: String,
    pub child_code_required: String,
    /// Fallback when a rejected submission carries no message
    pub unknown: String,
    pub root_success: String,
    pub child_success: String,
}

impl Default for NodeDialogMessages {
    fn default() -> Self {
        Self {
            required: "Please fill in all required fields".to_string(),
            chart_not_found: "Chart of accounts not found".to_string(),
            child_code_required: "Please enter a code for the child account".to_string(),
            unknown: "An unknown error occurred".to_string(),
            root_success: "Root account added successfully".to_string(),
            child_success: "Child account added successfully".to_string(),
        }
    }
}

impl NodeDialogMessages {
    pub fn validation_message(&self, error: &NodeValidationError) -> String {
        match error {
            NodeValidationError::MissingRequiredField => self.required.clone(),
            NodeValidationError::ChartNotResolved => self.chart_not_found.clone(),
            NodeValidationError::EmptyCodeAfterStrip => self.child_code_required.clone(),
        }
    }

    /// Text of a rejected submission, falling back to the generic message
    pub fn remote_failure_message(&self, message: &str) -> String {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            self.unknown.clone()
        } else {
            trimmed.to_string()
        }
    }

    /// Hint shown under the code field
    pub fn code_hint(&self, remaining: i64, max: usize) -> String {
        format!("{} of {} digits remaining", remaining, max)
    }
}
