use super::money::Money;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    /// Computed on demand; no money has moved.
    #[serde(rename = "P")]
    Proposed,
    /// A payment someone actually made.
    #[serde(rename = "A")]
    Actual,
}

/// Money moving from `debtor` to `creditor`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementTransaction {
    pub id: String,
    pub group_id: String,
    pub debtor: String,
    pub creditor: String,
    pub payment: Money,
    pub kind: TransactionKind,
    #[serde(default)]
    pub expense_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl SettlementTransaction {
    pub fn is_actual(&self) -> bool {
        self.kind == TransactionKind::Actual
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedTransaction {
    pub debtor_id: String,
    pub creditor_id: String,
    pub payment: Money,
}
