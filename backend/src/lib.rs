//! # Chart Console Backend
//!
//! Adds root and child accounts to a chart of accounts. The domain layer
//! allocates and validates account codes and runs the add-node dialogs;
//! storage traits describe the chart service the dialogs talk to.

use std::sync::Arc;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

pub use config::{AccountCodeConfig, ChartConsoleConfig, MAX_ACCOUNT_CODE_DIGITS};
pub use domain::models::AccountCode;
pub use domain::node_dialog::NodeDialog;
pub use storage::InMemoryChartStore;

/// Wires configuration and the chart store together for a front-end
pub struct Backend {
    pub config: ChartConsoleConfig,
    pub chart_store: Arc<InMemoryChartStore>,
}

impl Backend {
    /// Create a backend holding a fresh, empty chart
    pub fn new(config: ChartConsoleConfig) -> Self {
        let chart_store = Arc::new(InMemoryChartStore::new(
            &config.chart_name,
            config.account_code.clone(),
        ));
        Self { config, chart_store }
    }

    pub fn root_dialog(&self) -> NodeDialog {
        NodeDialog::root(&self.config)
    }

    pub fn child_dialog(&self, parent_code: AccountCode, parent_name: Option<String>) -> NodeDialog {
        NodeDialog::child(&self.config, parent_code, parent_name)
    }
}
