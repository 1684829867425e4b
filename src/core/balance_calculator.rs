//! Net balance per member, recomputed from a group's full history.
//!
//! Every expense credits its payer and debits the members it was split
//! across; every recorded payment credits the debtor and debits the creditor.
//! Amounts are integer minor units so the group total stays exactly zero.

use crate::config::Config;
use crate::core::errors::{FieldError, LedgerError, LedgerResult};
use crate::core::models::{Balances, Expense, LedgerSnapshot, Member, Money, SettlementTransaction};
use log::{debug, warn};
use std::collections::BTreeSet;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SplitPolicy {
    /// Reject explicit splits whose shares do not add up to the expense amount.
    pub strict_split_totals: bool,
}

impl SplitPolicy {
    pub fn from_config(config: &Config) -> Self {
        SplitPolicy {
            strict_split_totals: config.strict_split_totals,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct BalanceCalculator {
    policy: SplitPolicy,
}

impl BalanceCalculator {
    pub fn new(policy: SplitPolicy) -> Self {
        BalanceCalculator { policy }
    }

    pub fn calculate_snapshot(&self, snapshot: &LedgerSnapshot) -> LedgerResult<Balances> {
        self.calculate(&snapshot.members, &snapshot.expenses, &snapshot.settlements)
    }

    /// Computes every member's net balance. Members with no activity are
    /// present with a zero balance.
    pub fn calculate(
        &self,
        members: &[Member],
        expenses: &[Expense],
        settlements: &[SettlementTransaction],
    ) -> LedgerResult<Balances> {
        let roster = Self::roster(members)?;
        debug!(
            "Calculating balances for {} members, {} expenses, {} settlements",
            roster.len(),
            expenses.len(),
            settlements.len()
        );

        let mut balances: Balances = roster.iter().map(|id| (*id, Money::ZERO)).collect();

        for expense in expenses {
            self.apply_expense(expense, &roster, &mut balances)?;
        }
        for settlement in settlements {
            Self::apply_settlement(settlement, &roster, &mut balances)?;
        }

        let total = balances.total()?;
        if !total.is_zero() {
            return Err(LedgerError::UnbalancedLedger {
                total,
                tolerance: Money::ZERO,
            });
        }

        debug!("Balances calculated: {:?}", balances);
        Ok(balances)
    }

    /// Balance movements caused by a single expense.
    pub fn expense_deltas(&self, expense: &Expense, members: &[Member]) -> LedgerResult<Balances> {
        let roster = Self::roster(members)?;
        let mut deltas = Balances::new();
        self.apply_expense(expense, &roster, &mut deltas)?;
        Ok(deltas)
    }

    fn roster(members: &[Member]) -> LedgerResult<BTreeSet<&str>> {
        if members.is_empty() {
            return Err(LedgerError::EmptyMemberSet);
        }
        let mut roster = BTreeSet::new();
        for member in members {
            if !roster.insert(member.id.as_str()) {
                return Err(LedgerError::DuplicateMember(member.id.clone()));
            }
        }
        Ok(roster)
    }

    fn apply_expense(&self, expense: &Expense, roster: &BTreeSet<&str>, balances: &mut Balances) -> LedgerResult<()> {
        if !expense.amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                "amount".to_string(),
                FieldError::new(
                    "amount",
                    "Invalid Amount",
                    format!("Expense {} amount must be greater than 0", expense.id),
                ),
            ));
        }
        if !roster.contains(expense.paid_by.as_str()) {
            return Err(LedgerError::UnknownPayer {
                expense_id: expense.id.clone(),
                member_id: expense.paid_by.clone(),
            });
        }

        if expense.is_equal_split() {
            let (share, residual) = expense.amount.split_evenly(roster.len());
            balances.credit(&expense.paid_by, expense.amount)?;
            for member_id in roster {
                balances.debit(member_id, share)?;
            }
            // Leftover minor units stay with the payer.
            balances.debit(&expense.paid_by, residual)?;
            return Ok(());
        }

        let mut seen = BTreeSet::new();
        for participant in &expense.participants {
            if !roster.contains(participant.member_id.as_str()) {
                return Err(LedgerError::UnknownParticipant {
                    expense_id: expense.id.clone(),
                    member_id: participant.member_id.clone(),
                });
            }
            if participant.paid_amt.is_negative() {
                return Err(LedgerError::InvalidSplit(
                    expense.id.clone(),
                    format!("share for {} is negative", participant.member_id),
                ));
            }
            if !seen.insert(participant.member_id.as_str()) {
                return Err(LedgerError::InvalidSplit(
                    expense.id.clone(),
                    format!("{} is listed more than once", participant.member_id),
                ));
            }
        }

        let share_total = expense.share_total()?;
        if !share_total.is_positive() {
            return Err(LedgerError::InvalidSplit(
                expense.id.clone(),
                "participant shares sum to zero".to_string(),
            ));
        }
        if share_total != expense.amount {
            if self.policy.strict_split_totals {
                return Err(LedgerError::InvalidSplit(
                    expense.id.clone(),
                    format!("shares sum to {} but amount is {}", share_total, expense.amount),
                ));
            }
            warn!(
                "Expense {} shares sum to {} but amount is {}; using shares",
                expense.id, share_total, expense.amount
            );
        }

        // The participant list is authoritative, so the payer fronted exactly
        // what the shares add up to.
        balances.credit(&expense.paid_by, share_total)?;
        for participant in &expense.participants {
            balances.debit(&participant.member_id, participant.paid_amt)?;
        }
        Ok(())
    }

    fn apply_settlement(
        settlement: &SettlementTransaction,
        roster: &BTreeSet<&str>,
        balances: &mut Balances,
    ) -> LedgerResult<()> {
        if !settlement.is_actual() {
            debug!("Skipping proposed transaction {}", settlement.id);
            return Ok(());
        }
        for party in [&settlement.debtor, &settlement.creditor] {
            if !roster.contains(party.as_str()) {
                return Err(LedgerError::UnknownSettlementParty {
                    settlement_id: settlement.id.clone(),
                    member_id: party.clone(),
                });
            }
        }
        if !settlement.payment.is_positive() {
            return Err(LedgerError::InvalidInput(
                "payment".to_string(),
                FieldError::new(
                    "payment",
                    "Invalid Payment",
                    format!("Settlement {} payment must be greater than 0", settlement.id),
                ),
            ));
        }
        if settlement.debtor == settlement.creditor {
            return Err(LedgerError::SelfSettlement(settlement.debtor.clone()));
        }

        balances.credit(&settlement.debtor, settlement.payment)?;
        balances.debit(&settlement.creditor, settlement.payment)?;
        Ok(())
    }
}
