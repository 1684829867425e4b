use super::money::Money;
use crate::core::errors::LedgerResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExpenseParticipant {
    pub member_id: String,
    pub paid_amt: Money,
}

impl ExpenseParticipant {
    pub fn new(member_id: impl Into<String>, paid_amt: Money) -> Self {
        ExpenseParticipant {
            member_id: member_id.into(),
            paid_amt,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Expense {
    pub id: String,
    pub group_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Money,
    pub paid_by: String,
    /// Empty means split equally across every group member.
    #[serde(default)]
    pub participants: Vec<ExpenseParticipant>,
    pub created_at: DateTime<Utc>,
}

impl Expense {
    pub fn is_equal_split(&self) -> bool {
        self.participants.is_empty()
    }

    pub fn share_total(&self) -> LedgerResult<Money> {
        Money::checked_sum(
            &format!("shares of expense {}", self.id),
            self.participants.iter().map(|p| p.paid_amt),
        )
    }
}

/// Expense as submitted by a caller, before an id and timestamp are assigned.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewExpense {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub amount: Money,
    pub paid_by: String,
    #[serde(default)]
    pub participants: Vec<ExpenseParticipant>,
}
