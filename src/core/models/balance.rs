use super::money::Money;
use crate::core::errors::{LedgerError, LedgerResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemberBalance {
    pub member_id: String,
    /// Positive: the group owes this member. Negative: this member owes the group.
    pub balance: Money,
}

impl MemberBalance {
    pub fn is_settled(&self) -> bool {
        self.balance.is_zero()
    }
}

/// Net balance per member, iterated in member id order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Balances(BTreeMap<String, Money>);

impl Balances {
    pub fn new() -> Self {
        Balances(BTreeMap::new())
    }

    pub fn get(&self, member_id: &str) -> Option<Money> {
        self.0.get(member_id).copied()
    }

    pub fn credit(&mut self, member_id: &str, amount: Money) -> LedgerResult<()> {
        let entry = self.0.entry(member_id.to_string()).or_default();
        *entry = entry
            .checked_add(amount)
            .ok_or_else(|| LedgerError::AmountOverflow(format!("balance of {}", member_id)))?;
        Ok(())
    }

    pub fn debit(&mut self, member_id: &str, amount: Money) -> LedgerResult<()> {
        let entry = self.0.entry(member_id.to_string()).or_default();
        *entry = entry
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::AmountOverflow(format!("balance of {}", member_id)))?;
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.0.iter().map(|(id, m)| (id.as_str(), *m))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> LedgerResult<Money> {
        Money::checked_sum("balance total", self.0.values().copied())
    }

    pub fn nonzero_count(&self) -> usize {
        self.0.values().filter(|m| !m.is_zero()).count()
    }

    /// True when every member is at zero.
    pub fn is_settled(&self) -> bool {
        self.0.values().all(|m| m.is_zero())
    }

    pub fn to_list(&self) -> Vec<MemberBalance> {
        self.iter()
            .map(|(member_id, balance)| MemberBalance {
                member_id: member_id.to_string(),
                balance,
            })
            .collect()
    }
}

/// Later entries for the same member replace earlier ones.
impl<S: Into<String>> FromIterator<(S, Money)> for Balances {
    fn from_iter<I: IntoIterator<Item = (S, Money)>>(iter: I) -> Self {
        Balances(iter.into_iter().map(|(id, amount)| (id.into(), amount)).collect())
    }
}
