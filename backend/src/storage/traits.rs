//! # Storage Traits
//!
//! Interfaces to the service that owns the chart of accounts. The dialogs
//! only ever read the active chart and submit node mutations; how those
//! calls travel is up to the implementation.

use anyhow::Result;
use async_trait::async_trait;
use shared::{AddChildNodeRequest, AddRootNodeRequest, ChartMutationResponse, ChartOfAccounts};

/// Looks up the chart the console currently works on
#[async_trait]
pub trait ChartLookup: Send + Sync {
    /// Returns `None` while no chart is available
    async fn active_chart(&self) -> Result<Option<ChartOfAccounts>>;
}

/// Executes chart mutations.
///
/// A rejected mutation returns an error whose `Display` text is shown to
/// the operator as is.
#[async_trait]
pub trait ChartMutations: Send + Sync {
    async fn add_root_node(&self, request: AddRootNodeRequest) -> Result<ChartMutationResponse>;

    async fn add_child_node(&self, request: AddChildNodeRequest) -> Result<ChartMutationResponse>;
}
