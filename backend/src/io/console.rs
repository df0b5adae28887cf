//! Line-oriented console that hosts the add-node dialogs.
//!
//! Each command opens a dialog, fills in its fields the way an operator
//! would type them and submits. Navigation and notifications are collected
//! as output lines.

use anyhow::Result;
use shared::{ChartOfAccounts, DebitOrCredit};
use std::sync::{Mutex, PoisonError};
use tracing::debug;

use super::{Navigator, Notifier};
use crate::domain::models::AccountCode;
use crate::domain::node_dialog::{NodeDialog, NodeDialogKind};
use crate::storage::ChartLookup;
use crate::Backend;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleCommand {
    AddRoot {
        code: String,
        balance_side: DebitOrCredit,
        name: String,
    },
    AddChild {
        parent: String,
        code: String,
        name: String,
    },
    List,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "Commands:
  root <code> <debit|credit> <name...>   add a root account
  child <parent> <code> <name...>        add a child account
  list                                   show the chart
  help                                   show this help
  quit                                   exit";

impl ConsoleCommand {
    /// Parse one input line; `Ok(None)` for blank lines
    pub fn parse(line: &str) -> Result<Option<Self>, String> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Ok(None);
        };

        let command = match verb.to_lowercase().as_str() {
            "root" => {
                let code = words.next().ok_or("Usage: root <code> <debit|credit> <name...>")?;
                let side = words.next().ok_or("Usage: root <code> <debit|credit> <name...>")?;
                ConsoleCommand::AddRoot {
                    code: code.to_string(),
                    balance_side: DebitOrCredit::from_string(side)?,
                    name: words.collect::<Vec<_>>().join(" "),
                }
            }
            "child" => {
                let parent = words.next().ok_or("Usage: child <parent> <code> <name...>")?;
                let code = words.next().ok_or("Usage: child <parent> <code> <name...>")?;
                ConsoleCommand::AddChild {
                    parent: parent.to_string(),
                    code: code.to_string(),
                    name: words.collect::<Vec<_>>().join(" "),
                }
            }
            "list" | "ls" => ConsoleCommand::List,
            "help" | "?" => ConsoleCommand::Help,
            "quit" | "exit" => ConsoleCommand::Quit,
            other => return Err(format!("Unknown command: {}", other)),
        };
        Ok(Some(command))
    }
}

/// Collects everything the console wants to show the operator
#[derive(Default)]
pub struct ConsoleOutput {
    lines: Mutex<Vec<String>>,
}

impl ConsoleOutput {
    pub fn push(&self, line: impl Into<String>) {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        lines.push(line.into());
    }

    /// Take the lines written since the last call
    pub fn drain(&self) -> Vec<String> {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::take(&mut *lines)
    }
}

impl Navigator for ConsoleOutput {
    fn navigate(&self, path: &str) {
        self.push(format!("-> {}", path));
    }
}

impl Notifier for ConsoleOutput {
    fn success(&self, message: &str) {
        self.push(format!("OK {}", message));
    }
}

/// Run one command. Returns `false` when the console should exit.
pub async fn run_command(backend: &Backend, command: ConsoleCommand, output: &ConsoleOutput) -> Result<bool> {
    debug!("Running console command {:?}", command);

    match command {
        ConsoleCommand::AddRoot { code, balance_side, name } => {
            let mut dialog = backend.root_dialog();
            dialog.open(&*backend.chart_store).await;
            dialog.set_code(&code);
            dialog.set_name(&name);
            dialog.set_balance_side(balance_side);
            submit_dialog(backend, &mut dialog, &code, output).await;
        }
        ConsoleCommand::AddChild { parent, code, name } => {
            let chart = backend.chart_store.active_chart().await?;
            let parent_name = chart
                .as_ref()
                .and_then(|chart| chart.find_node(&parent))
                .map(|node| node.name.clone());

            let mut dialog = backend.child_dialog(AccountCode::new(parent), parent_name);
            dialog.open(&*backend.chart_store).await;
            dialog.set_code(&code);
            dialog.set_name(&name);
            submit_dialog(backend, &mut dialog, &code, output).await;
        }
        ConsoleCommand::List => match backend.chart_store.active_chart().await? {
            Some(chart) => {
                for line in render_chart(&chart) {
                    output.push(line);
                }
            }
            None => output.push("No chart of accounts"),
        },
        ConsoleCommand::Help => output.push(HELP_TEXT),
        ConsoleCommand::Quit => return Ok(false),
    }

    Ok(true)
}

async fn submit_dialog(backend: &Backend, dialog: &mut NodeDialog, typed_code: &str, output: &ConsoleOutput) {
    if let Some(prefix) = dialog.code_prefix() {
        let parent_name = match dialog.kind() {
            NodeDialogKind::Child { parent_name: Some(name), .. } => name.as_str(),
            _ => "",
        };
        output.push(format!("Adding under {} {}", prefix.trim_end_matches('.'), parent_name).trim_end().to_string());
    }
    if dialog.input().code != typed_code {
        output.push(format!("Code entered as {:?} ({})", dialog.input().code, dialog.code_hint_text()));
    }

    if let Err(e) = dialog.submit(&*backend.chart_store, output, output).await {
        debug!("Submission failed: {}", e);
        let message = dialog.error_message().map(str::to_string).unwrap_or_else(|| e.to_string());
        output.push(format!("Error: {}", message));
    }
    dialog.close();
}

/// One line per node, children indented under their parent
pub fn render_chart(chart: &ChartOfAccounts) -> Vec<String> {
    let mut nodes: Vec<_> = chart.nodes.iter().collect();
    nodes.sort_by(|a, b| a.code.cmp(&b.code));

    let mut lines = vec![format!("{} ({} accounts)", chart.name, nodes.len())];
    for node in nodes {
        let mut depth = 0;
        let mut parent = node.parent.as_deref();
        while let Some(code) = parent {
            depth += 1;
            parent = chart.find_node(code).and_then(|p| p.parent.as_deref());
        }
        lines.push(format!(
            "{}{} {} [{}]",
            "  ".repeat(depth + 1),
            node.code,
            node.name,
            node.normal_balance_type
        ));
    }
    lines
}
