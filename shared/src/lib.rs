use serde::{Deserialize, Serialize};
use std::fmt;

/// Side of the ledger on which an account naturally increases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DebitOrCredit {
    Debit,
    Credit,
}

impl DebitOrCredit {
    /// Parse a user-facing balance side ("debit", "Credit", "DR", ...)
    pub fn from_string(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "debit" | "dr" => Ok(DebitOrCredit::Debit),
            "credit" | "cr" => Ok(DebitOrCredit::Credit),
            _ => Err(format!("Invalid balance side: {}", s)),
        }
    }
}

impl fmt::Display for DebitOrCredit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DebitOrCredit::Debit => write!(f, "Debit"),
            DebitOrCredit::Credit => write!(f, "Credit"),
        }
    }
}

/// A single account node in a chart of accounts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartNode {
    /// Full dot-delimited account code, e.g. "1.2.03"
    pub code: String,
    pub name: String,
    /// Code of the parent node, `None` for root nodes
    pub parent: Option<String>,
    pub normal_balance_type: DebitOrCredit,
    /// RFC 3339 timestamp
    pub created_at: String,
}

/// The active chart of accounts as returned by the chart lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOfAccounts {
    pub id: String,
    /// Reference used when submitting mutations against this chart
    pub chart_id: String,
    pub name: String,
    pub nodes: Vec<ChartNode>,
}

impl ChartOfAccounts {
    /// Find a node by its full account code
    pub fn find_node(&self, code: &str) -> Option<&ChartNode> {
        self.nodes.iter().find(|node| node.code == code)
    }
}

/// Request for adding a top-level account to a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddRootNodeRequest {
    pub chart_id: String,
    pub code: String,
    pub name: String,
    pub normal_balance_type: DebitOrCredit,
}

/// Request for adding an account nested under an existing one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddChildNodeRequest {
    pub chart_id: String,
    /// Full code of the parent node
    pub parent: String,
    /// Full code of the new node (parent code, a dot, then the child fragment)
    pub code: String,
    pub name: String,
}

/// Response after a successful chart mutation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartMutationResponse {
    pub chart_of_accounts: ChartOfAccounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debit_or_credit_wire_format() {
        assert_eq!(serde_json::to_string(&DebitOrCredit::Debit).unwrap(), "\"DEBIT\"");
        assert_eq!(serde_json::to_string(&DebitOrCredit::Credit).unwrap(), "\"CREDIT\"");

        let parsed: DebitOrCredit = serde_json::from_str("\"CREDIT\"").unwrap();
        assert_eq!(parsed, DebitOrCredit::Credit);
    }

    #[test]
    fn test_debit_or_credit_from_string() {
        assert_eq!(DebitOrCredit::from_string("debit").unwrap(), DebitOrCredit::Debit);
        assert_eq!(DebitOrCredit::from_string(" Credit ").unwrap(), DebitOrCredit::Credit);
        assert_eq!(DebitOrCredit::from_string("DR").unwrap(), DebitOrCredit::Debit);
        assert!(DebitOrCredit::from_string("asset").is_err());
    }

    #[test]
    fn test_add_child_node_request_uses_camel_case() {
        let request = AddChildNodeRequest {
            chart_id: "chart-1".to_string(),
            parent: "1".to_string(),
            code: "1.2".to_string(),
            name: "Cash".to_string(),
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["chartId"], "chart-1");
        assert_eq!(value["parent"], "1");
        assert_eq!(value["code"], "1.2");
    }

    #[test]
    fn test_add_root_node_request_serializes_balance_type() {
        let request = AddRootNodeRequest {
            chart_id: "chart-1".to_string(),
            code: "1".to_string(),
            name: "Assets".to_string(),
            normal_balance_type: DebitOrCredit::Debit,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["normalBalanceType"], "DEBIT");
    }

    #[test]
    fn test_find_node() {
        let chart = ChartOfAccounts {
            id: "id".to_string(),
            chart_id: "chart".to_string(),
            name: "Primary".to_string(),
            nodes: vec![ChartNode {
                code: "1".to_string(),
                name: "Assets".to_string(),
                parent: None,
                normal_balance_type: DebitOrCredit::Debit,
                created_at: "2024-01-01T00:00:00Z".to_string(),
            }],
        };

        assert_eq!(chart.find_node("1").map(|n| n.name.as_str()), Some("Assets"));
        assert!(chart.find_node("2").is_none());
    }
}
