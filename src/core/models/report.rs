use super::balance::MemberBalance;
use super::money::Money;
use super::settlement::SuggestedTransaction;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SettlementReport {
    pub group_id: String,
    pub balances: Vec<MemberBalance>,
    pub suggestions: Vec<SuggestedTransaction>,
    pub computed_at: DateTime<Utc>,
}

impl SettlementReport {
    pub fn is_settled(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// One member's slice of a report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MemberSummary {
    pub member_id: String,
    pub balance: Money,
    pub pays: Vec<SuggestedTransaction>,
    pub receives: Vec<SuggestedTransaction>,
}
