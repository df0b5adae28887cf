use serde::{Deserialize, Serialize};
use shared::DebitOrCredit;
use std::fmt;

/// A full, dot-delimited account code such as "1", "1.2" or "1.2.03"
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccountCode(String);

impl AccountCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of digit characters, separators excluded
    pub fn digit_count(&self) -> usize {
        self.0.chars().filter(|c| c.is_ascii_digit()).count()
    }
}

impl fmt::Display for AccountCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identifier of the chart a node is added to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChartReference(String);

impl ChartReference {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChartReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw field values collected by a node dialog
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionFields<'a> {
    pub code_fragment: &'a str,
    pub name: &'a str,
    /// Set for child nodes, `None` when adding a root node
    pub parent_code: Option<&'a AccountCode>,
    /// `None` until the chart lookup has resolved
    pub chart_reference: Option<&'a ChartReference>,
    /// Required for root nodes only
    pub balance_side: Option<DebitOrCredit>,
}

/// Where a validated node goes in the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodePlacement {
    Root { normal_balance_type: DebitOrCredit },
    Child { parent: AccountCode },
}

/// A node ready to be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInput {
    pub code: AccountCode,
    pub name: String,
    pub chart: ChartReference,
    pub placement: NodePlacement,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeValidationError {
    #[error("Code and name are required")]
    MissingRequiredField,
    #[error("Chart of accounts has not been loaded")]
    ChartNotResolved,
    #[error("Child code must contain at least one digit")]
    EmptyCodeAfterStrip,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NodeSubmissionError {
    #[error(transparent)]
    Validation(#[from] NodeValidationError),
    #[error("Submission failed: {0}")]
    RemoteSubmissionFailed(String),
    #[error("A submission is already in progress")]
    SubmissionInFlight,
    #[error("Dialog is not open")]
    DialogClosed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_code_digit_count() {
        assert_eq!(AccountCode::new("1.2.03").digit_count(), 4);
        assert_eq!(AccountCode::new("").digit_count(), 0);
        assert_eq!(AccountCode::new("...").digit_count(), 0);
    }

    #[test]
    fn test_validation_error_converts_into_submission_error() {
        let error: NodeSubmissionError = NodeValidationError::ChartNotResolved.into();
        assert_eq!(error, NodeSubmissionError::Validation(NodeValidationError::ChartNotResolved));
        assert_eq!(error.to_string(), "Chart of accounts has not been loaded");
    }
}
