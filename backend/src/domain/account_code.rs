//! Account code allocation and validation for chart of accounts nodes.
//!
//! Codes are dot-delimited numeric segments. The digits of a full code,
//! separators excluded, never exceed the configured maximum. Root codes are
//! a single segment; a child code is its parent's code, a `.`, and the
//! fragment typed by the operator.
//!
//! Everything here is pure. The dialog flow in `node_dialog` calls these
//! functions on each keystroke and on submission.

use crate::config::AccountCodeConfig;
use crate::domain::models::{
    AccountCode, NodePlacement, NodeValidationError, SubmissionFields, ValidatedInput,
};
use tracing::debug;

/// Count digit characters, ignoring separators and anything else
pub fn total_digit_count(code: &str) -> usize {
    code.chars().filter(|c| c.is_ascii_digit()).count()
}

/// Keep only ASCII digits and truncate to `max_digits`
pub fn sanitize_root_code(raw: &str, max_digits: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max_digits).collect()
}

/// Clean a child fragment so that parent and fragment together stay within `max_digits`.
///
/// Digits and `.` survive, everything else is dropped. Scanning stops at the
/// first digit past the remaining budget; separators emitted before that
/// digit are kept.
pub fn sanitize_child_code(raw: &str, parent_code: &str, max_digits: usize) -> String {
    let parent_digits = total_digit_count(parent_code);
    if parent_digits >= max_digits {
        return String::new();
    }
    let budget = max_digits - parent_digits;

    raw.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .scan(0usize, |digits, c| {
            if c == '.' {
                return Some(c);
            }
            if *digits == budget {
                return None;
            }
            *digits += 1;
            Some(c)
        })
        .collect()
}

/// Digits still available for the code being typed. Not clamped: unsanitized
/// input can produce a negative value.
pub fn remaining_digits(parent_code: &str, fragment: &str, max_digits: usize) -> i64 {
    max_digits as i64 - total_digit_count(parent_code) as i64 - total_digit_count(fragment) as i64
}

pub fn compose_child_code(parent: &AccountCode, fragment: &str) -> AccountCode {
    AccountCode::new(format!("{}.{}", parent, fragment))
}

/// Route of the ledger account page for a full code
pub fn ledger_account_path(prefix: &str, code: &AccountCode) -> String {
    format!("{}/{}", prefix.trim_end_matches('/'), code)
}

/// Check a proposed node before anything is sent to the chart service.
///
/// Checks run in order: required fields, chart resolution, then (child
/// nodes only) that the fragment has at least one digit.
pub fn validate_submission(fields: SubmissionFields<'_>) -> Result<ValidatedInput, NodeValidationError> {
    let fragment = fields.code_fragment.trim();
    let name = fields.name.trim();

    let missing_balance_side = fields.parent_code.is_none() && fields.balance_side.is_none();
    if fragment.is_empty() || name.is_empty() || missing_balance_side {
        return Err(NodeValidationError::MissingRequiredField);
    }

    let chart = fields
        .chart_reference
        .cloned()
        .ok_or(NodeValidationError::ChartNotResolved)?;

    let (code, placement) = match (fields.parent_code, fields.balance_side) {
        (Some(parent), _) => {
            if fragment.replace('.', "").is_empty() {
                return Err(NodeValidationError::EmptyCodeAfterStrip);
            }
            (
                compose_child_code(parent, fragment),
                NodePlacement::Child { parent: parent.clone() },
            )
        }
        (None, Some(normal_balance_type)) => (
            AccountCode::new(fragment),
            NodePlacement::Root { normal_balance_type },
        ),
        (None, None) => return Err(NodeValidationError::MissingRequiredField),
    };

    debug!("Validated node {} ({}) for chart {}", code, name, chart);

    Ok(ValidatedInput {
        code,
        name: name.to_string(),
        chart,
        placement,
    })
}

/// Account code rules bound to a configured digit budget
#[derive(Debug, Clone, Default)]
pub struct AccountCodeService {
    config: AccountCodeConfig,
}

impl AccountCodeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AccountCodeConfig) -> Self {
        Self { config }
    }

    pub fn max_digits(&self) -> usize {
        self.config.max_account_code_digits
    }

    pub fn sanitize_root_code(&self, raw: &str) -> String {
        sanitize_root_code(raw, self.max_digits())
    }

    pub fn sanitize_child_code(&self, raw: &str, parent_code: &AccountCode) -> String {
        sanitize_child_code(raw, parent_code.as_str(), self.max_digits())
    }

    /// Remaining digits for a fragment; pass `None` as parent for root codes
    pub fn remaining_digits(&self, parent_code: Option<&AccountCode>, fragment: &str) -> i64 {
        let parent = parent_code.map(AccountCode::as_str).unwrap_or("");
        remaining_digits(parent, fragment, self.max_digits())
    }

    /// Whether a full code respects the digit budget
    pub fn is_within_budget(&self, code: &str) -> bool {
        total_digit_count(code) <= self.max_digits()
    }

    pub fn validate_submission(&self, fields: SubmissionFields<'_>) -> Result<ValidatedInput, NodeValidationError> {
        validate_submission(fields)
    }
}
