//! Greedy debt simplification.
//!
//! The largest remaining debtor pays the largest remaining creditor as much
//! as one of them needs, and whichever side reaches zero drops out. Each
//! payment retires at least one member, so `n` non-zero balances settle in at
//! most `n - 1` payments. This is a heuristic: the true minimum number of
//! payments is a subset-sum style search and is not attempted.
//!
//! ```text
//! A: +200   B: -100   C: -100
//!   B pays A 100
//!   C pays A 100
//! ```

use crate::config::Config;
use crate::core::errors::{LedgerError, LedgerResult};
use crate::core::models::{Balances, Money, SettlementTransaction, SuggestedTransaction, TransactionKind};
use chrono::{DateTime, Utc};
use log::{debug, warn};
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use uuid::Uuid;

/// A member's outstanding amount, ordered so the heap pops the largest
/// amount first and the lowest member id among equals.
#[derive(Debug, PartialEq, Eq)]
struct Position {
    remaining: Money,
    member_id: String,
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.remaining
            .cmp(&other.remaining)
            .then_with(|| other.member_id.cmp(&self.member_id))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Clone, Debug, Default)]
pub struct SettlementOptimizer {
    tolerance: Money,
}

impl SettlementOptimizer {
    pub fn new(tolerance: Money) -> Self {
        SettlementOptimizer {
            tolerance: tolerance.abs(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(Money::from_minor(config.settlement_tolerance_minor))
    }

    /// Payments that bring every balance to zero, in emission order.
    pub fn optimize(&self, balances: &Balances) -> LedgerResult<Vec<SuggestedTransaction>> {
        let total = balances.total()?;
        let overflow = || LedgerError::AmountOverflow("balance total".to_string());
        if total.checked_abs().ok_or_else(overflow)? > self.tolerance {
            return Err(LedgerError::UnbalancedLedger {
                total,
                tolerance: self.tolerance,
            });
        }

        let mut creditors = BinaryHeap::new();
        let mut debtors = BinaryHeap::new();
        for (member_id, balance) in balances.iter() {
            let remaining = balance
                .checked_abs()
                .ok_or_else(|| LedgerError::AmountOverflow(format!("balance of {}", member_id)))?;
            let position = Position {
                remaining,
                member_id: member_id.to_string(),
            };
            if balance.is_positive() {
                creditors.push(position);
            } else if balance.is_negative() {
                debtors.push(position);
            }
        }
        debug!(
            "Optimizing settlements for {} creditors and {} debtors",
            creditors.len(),
            debtors.len()
        );

        let mut suggestions = Vec::with_capacity(creditors.len() + debtors.len());
        while !debtors.is_empty() && !creditors.is_empty() {
            let (Some(mut debtor), Some(mut creditor)) = (debtors.pop(), creditors.pop()) else {
                break;
            };
            let payment = debtor.remaining.min(creditor.remaining);
            suggestions.push(SuggestedTransaction {
                debtor_id: debtor.member_id.clone(),
                creditor_id: creditor.member_id.clone(),
                payment,
            });

            debtor.remaining -= payment;
            creditor.remaining -= payment;
            if debtor.remaining.is_positive() {
                debtors.push(debtor);
            }
            if creditor.remaining.is_positive() {
                creditors.push(creditor);
            }
        }

        let residue = Money::checked_sum(
            "settlement residue",
            debtors.iter().chain(creditors.iter()).map(|p| p.remaining),
        )?;
        if !residue.is_zero() {
            warn!("Dropping {} of unsettled residue within tolerance {}", residue, self.tolerance);
        }

        debug!("Suggested settlements: {:?}", suggestions);
        Ok(suggestions)
    }

    /// Turns suggestions into proposed history records, optionally tied to
    /// the expense they settle.
    pub fn into_transactions(
        suggestions: &[SuggestedTransaction],
        group_id: &str,
        expense_id: Option<&str>,
        now: DateTime<Utc>,
    ) -> Vec<SettlementTransaction> {
        suggestions
            .iter()
            .map(|s| SettlementTransaction {
                id: Uuid::new_v4().to_string(),
                group_id: group_id.to_string(),
                debtor: s.debtor_id.clone(),
                creditor: s.creditor_id.clone(),
                payment: s.payment,
                kind: TransactionKind::Proposed,
                expense_id: expense_id.map(String::from),
                created_at: now,
            })
            .collect()
    }
}
