//! In-memory chart of accounts.
//!
//! Holds a single chart and applies the structural rules the chart service
//! enforces on new nodes: unique codes, an existing parent, child codes
//! nested under their parent, and the digit budget.

use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::Utc;
use shared::{
    AddChildNodeRequest, AddRootNodeRequest, ChartMutationResponse, ChartNode, ChartOfAccounts,
};
use tokio::sync::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use super::traits::{ChartLookup, ChartMutations};
use crate::config::AccountCodeConfig;
use crate::domain::account_code::AccountCodeService;

pub struct InMemoryChartStore {
    chart: RwLock<Option<ChartOfAccounts>>,
    code_service: AccountCodeService,
}

impl InMemoryChartStore {
    /// Create a store holding an empty chart with fresh identifiers
    pub fn new(chart_name: &str, config: AccountCodeConfig) -> Self {
        let chart = ChartOfAccounts {
            id: Uuid::new_v4().to_string(),
            chart_id: Uuid::new_v4().to_string(),
            name: chart_name.to_string(),
            nodes: Vec::new(),
        };
        info!("Created chart '{}' with id {}", chart.name, chart.chart_id);
        Self {
            chart: RwLock::new(Some(chart)),
            code_service: AccountCodeService::with_config(config),
        }
    }

    /// Create a store whose chart lookup never resolves
    pub fn without_chart(config: AccountCodeConfig) -> Self {
        Self {
            chart: RwLock::new(None),
            code_service: AccountCodeService::with_config(config),
        }
    }

    pub async fn snapshot(&self) -> Option<ChartOfAccounts> {
        self.chart.read().await.clone()
    }

    fn check_chart(chart: &ChartOfAccounts, chart_id: &str) -> Result<()> {
        if chart.chart_id != chart_id {
            bail!("Chart {} not found", chart_id);
        }
        Ok(())
    }

    fn check_new_code(&self, chart: &ChartOfAccounts, code: &str) -> Result<()> {
        if !self.code_service.is_within_budget(code) {
            bail!(
                "Account code {} exceeds {} digits",
                code,
                self.code_service.max_digits()
            );
        }
        if chart.find_node(code).is_some() {
            bail!("Account code {} already exists", code);
        }
        Ok(())
    }
}

#[async_trait]
impl ChartLookup for InMemoryChartStore {
    async fn active_chart(&self) -> Result<Option<ChartOfAccounts>> {
        Ok(self.chart.read().await.clone())
    }
}

#[async_trait]
impl ChartMutations for InMemoryChartStore {
    async fn add_root_node(&self, request: AddRootNodeRequest) -> Result<ChartMutationResponse> {
        info!("Adding root node {} ({})", request.code, request.name);

        let mut guard = self.chart.write().await;
        let chart = guard.as_mut().ok_or_else(|| anyhow!("Chart of accounts not found"))?;
        Self::check_chart(chart, &request.chart_id)?;

        if request.code.is_empty() || !request.code.chars().all(|c| c.is_ascii_digit()) {
            warn!("Rejected root code {:?}", request.code);
            bail!("Root account code must be a single numeric segment");
        }
        self.check_new_code(chart, &request.code)?;

        chart.nodes.push(ChartNode {
            code: request.code,
            name: request.name,
            parent: None,
            normal_balance_type: request.normal_balance_type,
            created_at: Utc::now().to_rfc3339(),
        });

        Ok(ChartMutationResponse {
            chart_of_accounts: chart.clone(),
        })
    }

    async fn add_child_node(&self, request: AddChildNodeRequest) -> Result<ChartMutationResponse> {
        info!("Adding child node {} under {} ({})", request.code, request.parent, request.name);

        let mut guard = self.chart.write().await;
        let chart = guard.as_mut().ok_or_else(|| anyhow!("Chart of accounts not found"))?;
        Self::check_chart(chart, &request.chart_id)?;

        let normal_balance_type = chart
            .find_node(&request.parent)
            .map(|parent| parent.normal_balance_type)
            .ok_or_else(|| anyhow!("Parent account {} not found", request.parent))?;

        let fragment = request
            .code
            .strip_prefix(&format!("{}.", request.parent))
            .ok_or_else(|| anyhow!("Account code {} is not nested under {}", request.code, request.parent))?;
        let valid_segments = fragment
            .split('.')
            .all(|segment| !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()));
        if !valid_segments {
            warn!("Rejected child code {:?}", request.code);
            bail!("Account code {} is not a valid child code", request.code);
        }
        self.check_new_code(chart, &request.code)?;

        chart.nodes.push(ChartNode {
            code: request.code,
            name: request.name,
            parent: Some(request.parent),
            normal_balance_type,
            created_at: Utc::now().to_rfc3339(),
        });

        Ok(ChartMutationResponse {
            chart_of_accounts: chart.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DebitOrCredit;

    fn store() -> InMemoryChartStore {
        InMemoryChartStore::new("Test Chart", AccountCodeConfig::default())
    }

    async fn chart_id(store: &InMemoryChartStore) -> String {
        store.active_chart().await.unwrap().unwrap().chart_id
    }

    fn root(chart_id: &str, code: &str) -> AddRootNodeRequest {
        AddRootNodeRequest {
            chart_id: chart_id.to_string(),
            code: code.to_string(),
            name: "Assets".to_string(),
            normal_balance_type: DebitOrCredit::Debit,
        }
    }

    fn child(chart_id: &str, parent: &str, code: &str) -> AddChildNodeRequest {
        AddChildNodeRequest {
            chart_id: chart_id.to_string(),
            parent: parent.to_string(),
            code: code.to_string(),
            name: "Cash".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_root_and_child_nodes() {
        let store = store();
        let id = chart_id(&store).await;

        store.add_root_node(root(&id, "1")).await.unwrap();
        let response = store.add_child_node(child(&id, "1", "1.01")).await.unwrap();

        let chart = response.chart_of_accounts;
        assert_eq!(chart.nodes.len(), 2);
        let cash = chart.find_node("1.01").unwrap();
        assert_eq!(cash.parent.as_deref(), Some("1"));
        assert_eq!(cash.normal_balance_type, DebitOrCredit::Debit);
    }

    #[tokio::test]
    async fn test_duplicate_code_is_rejected() {
        let store = store();
        let id = chart_id(&store).await;

        store.add_root_node(root(&id, "1")).await.unwrap();
        let err = store.add_root_node(root(&id, "1")).await.unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[tokio::test]
    async fn test_root_code_must_be_single_segment() {
        let store = store();
        let id = chart_id(&store).await;

        assert!(store.add_root_node(root(&id, "1.2")).await.is_err());
        assert!(store.add_root_node(root(&id, "")).await.is_err());
    }

    #[tokio::test]
    async fn test_child_requires_existing_parent() {
        let store = store();
        let id = chart_id(&store).await;

        let err = store.add_child_node(child(&id, "9", "9.1")).await.unwrap_err();
        assert!(err.to_string().contains("Parent account 9 not found"));
    }

    #[tokio::test]
    async fn test_child_code_must_be_nested_under_parent() {
        let store = store();
        let id = chart_id(&store).await;
        store.add_root_node(root(&id, "1")).await.unwrap();

        assert!(store.add_child_node(child(&id, "1", "2.1")).await.is_err());
        assert!(store.add_child_node(child(&id, "1", "1....")).await.is_err());
    }

    #[tokio::test]
    async fn test_child_code_with_empty_segment_is_rejected() {
        let store = store();
        let id = chart_id(&store).await;
        store.add_root_node(root(&id, "1")).await.unwrap();

        for code in ["1..2", "1.2.", "1...2.", "1.."] {
            let err = store.add_child_node(child(&id, "1", code)).await.unwrap_err();
            assert!(err.to_string().contains("not a valid child code"), "{}", code);
        }
        store.add_child_node(child(&id, "1", "1.2.3")).await.unwrap();
        assert!(store.snapshot().await.unwrap().find_node("1.2.3").is_some());
    }

    #[tokio::test]
    async fn test_digit_budget_is_enforced() {
        let store = InMemoryChartStore::new("Small", AccountCodeConfig { max_account_code_digits: 3 });
        let id = chart_id(&store).await;

        store.add_root_node(root(&id, "12")).await.unwrap();
        store.add_child_node(child(&id, "12", "12.3")).await.unwrap();
        let err = store.add_child_node(child(&id, "12", "12.34")).await.unwrap_err();
        assert!(err.to_string().contains("exceeds 3 digits"));
    }

    #[tokio::test]
    async fn test_wrong_chart_id_is_rejected() {
        let store = store();
        assert!(store.add_root_node(root("other", "1")).await.is_err());
    }

    #[tokio::test]
    async fn test_store_without_chart() {
        let store = InMemoryChartStore::without_chart(AccountCodeConfig::default());
        assert!(store.active_chart().await.unwrap().is_none());
        assert!(store.snapshot().await.is_none());
        assert!(store.add_root_node(root("any", "1")).await.is_err());
    }
}
