//! Add-node dialog flow.
//!
//! A dialog moves through `Idle -> Editing -> Submitting` and then either
//! closes on success or lands in `Failed` with the message shown inline.
//! `Failed` still accepts edits; the message stays until the next
//! submission. Only one submission per dialog is ever in flight.

use anyhow::Result;
use shared::{AddChildNodeRequest, AddRootNodeRequest, ChartMutationResponse, ChartOfAccounts, DebitOrCredit};
use tracing::{debug, error, info, warn};

use crate::config::ChartConsoleConfig;
use crate::domain::account_code::{ledger_account_path, AccountCodeService};
use crate::domain::messages::NodeDialogMessages;
use crate::domain::models::{
    AccountCode, ChartReference, NodePlacement, NodeSubmissionError, SubmissionFields, ValidatedInput,
};
use crate::io::{Navigator, Notifier};
use crate::storage::traits::{ChartLookup, ChartMutations};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogPhase {
    /// Closed
    Idle,
    Editing,
    /// A mutation is in flight, fields and buttons are inert
    Submitting,
    /// Last submission failed; fields stay editable
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeDialogKind {
    Root,
    Child {
        parent_code: AccountCode,
        parent_name: Option<String>,
    },
}

/// What the operator has typed so far
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PendingNodeInput {
    pub code: String,
    pub name: String,
    /// Only used by the root dialog
    pub balance_side: Option<DebitOrCredit>,
}

/// Digit budget shown under the code field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodeHint {
    pub remaining: i64,
    pub max: usize,
}

/// Result of a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct NodeCreated {
    pub code: AccountCode,
    /// Page the navigator was sent to
    pub path: String,
    pub chart: ChartOfAccounts,
}

pub struct NodeDialog {
    kind: NodeDialogKind,
    phase: DialogPhase,
    input: PendingNodeInput,
    chart: Option<ChartReference>,
    code_service: AccountCodeService,
    messages: NodeDialogMessages,
    path_prefix: String,
}

impl NodeDialog {
    pub fn root(config: &ChartConsoleConfig) -> Self {
        Self::new(NodeDialogKind::Root, config)
    }

    pub fn child(config: &ChartConsoleConfig, parent_code: AccountCode, parent_name: Option<String>) -> Self {
        Self::new(NodeDialogKind::Child { parent_code, parent_name }, config)
    }

    fn new(kind: NodeDialogKind, config: &ChartConsoleConfig) -> Self {
        Self {
            kind,
            phase: DialogPhase::Idle,
            input: PendingNodeInput::default(),
            chart: None,
            code_service: AccountCodeService::with_config(config.account_code.clone()),
            messages: NodeDialogMessages::default(),
            path_prefix: config.ledger_account_path_prefix.clone(),
        }
    }

    pub fn with_messages(mut self, messages: NodeDialogMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn kind(&self) -> &NodeDialogKind {
        &self.kind
    }

    pub fn phase(&self) -> &DialogPhase {
        &self.phase
    }

    pub fn input(&self) -> &PendingNodeInput {
        &self.input
    }

    pub fn chart_reference(&self) -> Option<&ChartReference> {
        self.chart.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.phase != DialogPhase::Idle
    }

    /// True while a submission is in flight
    pub fn is_busy(&self) -> bool {
        self.phase == DialogPhase::Submitting
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            DialogPhase::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    fn accepts_edits(&self) -> bool {
        matches!(self.phase, DialogPhase::Editing | DialogPhase::Failed(_))
    }

    fn parent_code(&self) -> Option<&AccountCode> {
        match &self.kind {
            NodeDialogKind::Root => None,
            NodeDialogKind::Child { parent_code, .. } => Some(parent_code),
        }
    }

    /// Fixed prefix shown before the child code field, e.g. "1.2."
    pub fn code_prefix(&self) -> Option<String> {
        self.parent_code().map(|parent| format!("{}.", parent))
    }

    /// Open the dialog and fetch the active chart once.
    ///
    /// A failed or empty lookup, or a chart with a blank id, leaves the chart
    /// unresolved; submitting then reports that the chart was not found.
    pub async fn open(&mut self, lookup: &dyn ChartLookup) {
        if self.is_open() {
            debug!("Dialog already open");
            return;
        }
        self.input = PendingNodeInput::default();
        self.chart = None;
        self.phase = DialogPhase::Editing;

        match lookup.active_chart().await {
            Ok(Some(chart)) if !chart.chart_id.trim().is_empty() => {
                debug!("Resolved chart {}", chart.chart_id);
                self.chart = Some(ChartReference::new(chart.chart_id));
            }
            Ok(Some(chart)) => warn!("Active chart {} has no chart id", chart.id),
            Ok(None) => warn!("No active chart of accounts"),
            Err(e) => warn!("Chart lookup failed: {}", e),
        }
    }

    /// Late resolution of a chart lookup still pending at open
    pub fn resolve_chart(&mut self, chart: ChartReference) {
        if chart.as_str().trim().is_empty() {
            warn!("Ignoring blank chart reference");
            return;
        }
        if self.is_open() && self.chart.is_none() {
            self.chart = Some(chart);
        }
    }

    pub fn set_code(&mut self, raw: &str) {
        if !self.accepts_edits() {
            debug!("Ignoring code edit in phase {:?}", self.phase);
            return;
        }
        self.input.code = match self.parent_code() {
            None => self.code_service.sanitize_root_code(raw),
            Some(parent) => self.code_service.sanitize_child_code(raw, parent),
        };
    }

    pub fn set_name(&mut self, raw: &str) {
        if !self.accepts_edits() {
            debug!("Ignoring name edit in phase {:?}", self.phase);
            return;
        }
        self.input.name = raw.to_string();
    }

    /// Child nodes take the balance side of their parent, so child dialogs ignore this
    pub fn set_balance_side(&mut self, side: DebitOrCredit) {
        if !self.accepts_edits() || self.parent_code().is_some() {
            return;
        }
        self.input.balance_side = Some(side);
    }

    pub fn code_hint(&self) -> CodeHint {
        CodeHint {
            remaining: self.code_service.remaining_digits(self.parent_code(), &self.input.code),
            max: self.code_service.max_digits(),
        }
    }

    pub fn code_hint_text(&self) -> String {
        let hint = self.code_hint();
        self.messages.code_hint(hint.remaining, hint.max)
    }

    /// Validate the pending input and enter `Submitting`.
    ///
    /// Validation failures surface inline and never reach the chart service.
    pub fn begin_submission(&mut self) -> Result<ValidatedInput, NodeSubmissionError> {
        match self.phase {
            DialogPhase::Idle => return Err(NodeSubmissionError::DialogClosed),
            DialogPhase::Submitting => return Err(NodeSubmissionError::SubmissionInFlight),
            _ => {}
        }
        self.phase = DialogPhase::Editing;

        let fields = SubmissionFields {
            code_fragment: &self.input.code,
            name: &self.input.name,
            parent_code: self.parent_code(),
            chart_reference: self.chart.as_ref(),
            balance_side: self.input.balance_side,
        };

        match self.code_service.validate_submission(fields) {
            Ok(validated) => {
                self.phase = DialogPhase::Submitting;
                Ok(validated)
            }
            Err(e) => {
                debug!("Validation failed: {}", e);
                self.phase = DialogPhase::Failed(self.messages.validation_message(&e));
                Err(e.into())
            }
        }
    }

    /// Apply the outcome of the mutation started by `begin_submission`.
    ///
    /// Results arriving after the dialog was closed are dropped.
    pub fn finish_submission(
        &mut self,
        submitted: &ValidatedInput,
        outcome: Result<ChartMutationResponse>,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Result<NodeCreated, NodeSubmissionError> {
        if !self.is_busy() {
            debug!("Dropping submission result for {} in phase {:?}", submitted.code, self.phase);
            return Err(NodeSubmissionError::DialogClosed);
        }

        match outcome {
            Ok(response) => {
                info!("Created account {} ({})", submitted.code, submitted.name);
                notifier.success(self.success_message());
                self.close();

                let path = ledger_account_path(&self.path_prefix, &submitted.code);
                navigator.navigate(&path);

                Ok(NodeCreated {
                    code: submitted.code.clone(),
                    path,
                    chart: response.chart_of_accounts,
                })
            }
            Err(e) => {
                error!("Error adding node {}: {:#}", submitted.code, e);
                let message = self.messages.remote_failure_message(&e.to_string());
                self.phase = DialogPhase::Failed(message.clone());
                Err(NodeSubmissionError::RemoteSubmissionFailed(message))
            }
        }
    }

    /// Validate, run the mutation and apply its outcome
    pub async fn submit(
        &mut self,
        mutations: &dyn ChartMutations,
        navigator: &dyn Navigator,
        notifier: &dyn Notifier,
    ) -> Result<NodeCreated, NodeSubmissionError> {
        let validated = self.begin_submission()?;
        let outcome = execute_mutation(mutations, &validated).await;
        self.finish_submission(&validated, outcome, navigator, notifier)
    }

    /// Discard pending input and close
    pub fn close(&mut self) {
        self.input = PendingNodeInput::default();
        self.chart = None;
        self.phase = DialogPhase::Idle;
    }

    fn success_message(&self) -> &str {
        match self.kind {
            NodeDialogKind::Root => &self.messages.root_success,
            NodeDialogKind::Child { .. } => &self.messages.child_success,
        }
    }
}

/// Send a validated node to the chart service
pub async fn execute_mutation(
    mutations: &dyn ChartMutations,
    input: &ValidatedInput,
) -> Result<ChartMutationResponse> {
    match &input.placement {
        NodePlacement::Root { normal_balance_type } => {
            mutations
                .add_root_node(AddRootNodeRequest {
                    chart_id: input.chart.to_string(),
                    code: input.code.to_string(),
                    name: input.name.clone(),
                    normal_balance_type: *normal_balance_type,
                })
                .await
        }
        NodePlacement::Child { parent } => {
            mutations
                .add_child_node(AddChildNodeRequest {
                    chart_id: input.chart.to_string(),
                    parent: parent.to_string(),
                    code: input.code.to_string(),
                    name: input.name.clone(),
                })
                .await
        }
    }
}
