use super::expense::Expense;
use super::group::Member;
use super::settlement::SettlementTransaction;
use serde::{Deserialize, Serialize};

/// Consistent, immutable view of one group's ledger at a point in time.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub group_id: String,
    pub members: Vec<Member>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<SettlementTransaction>,
}
