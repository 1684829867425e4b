use crate::config::{CONFIG, Config};
use crate::core::balance_calculator::{BalanceCalculator, SplitPolicy};
use crate::core::constants::{
    BALANCES_QUERIED, EXPENSE_ADDED, EXPENSE_UPDATED, EXPENSES_QUERIED, HISTORY_QUERIED, MAX_TITLE_LENGTH,
    PAYMENT_RECORDED, SETTLEMENTS_SUGGESTED,
};
use crate::core::errors::{FieldError, LedgerError};
use crate::core::models::{
    Expense, Group, MemberBalance, MemberSummary, Money, NewExpense, SettlementReport, SettlementTransaction,
    SuggestedTransaction, TransactionKind,
};
use crate::core::settlement_optimizer::SettlementOptimizer;
use crate::infrastructure::cache::Cache;
use crate::infrastructure::logging::LoggingService;
use crate::infrastructure::storage::Storage;
use chrono::Utc;
use log::{debug, info, warn};
use serde_json::json;
use std::time::Duration;
use uuid::Uuid;

/// Application-facing entry point: pulls a consistent snapshot from storage,
/// runs the calculator and optimizer over it, and records payments.
pub struct LedgerService<L: LoggingService, S: Storage, C: Cache> {
    storage: S,
    logging: L,
    cache: C,
    calculator: BalanceCalculator,
    optimizer: SettlementOptimizer,
    cache_ttl: Duration,
    max_expense_amount: Money,
}

impl<L: LoggingService, S: Storage, C: Cache> LedgerService<L, S, C> {
    pub fn new(storage: S, logging: L, cache: C) -> Self {
        Self::with_config(storage, logging, cache, &CONFIG)
    }

    pub fn with_config(storage: S, logging: L, cache: C, config: &Config) -> Self {
        info!("Initializing LedgerService");
        LedgerService {
            storage,
            logging,
            cache,
            calculator: BalanceCalculator::new(SplitPolicy::from_config(config)),
            optimizer: SettlementOptimizer::from_config(config),
            cache_ttl: Duration::from_secs(config.balance_cache_ttl_secs),
            max_expense_amount: Money::from_minor(config.max_expense_amount_minor),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn logging(&self) -> &L {
        &self.logging
    }

    async fn get_group(&self, group_id: &str) -> Result<Group, LedgerError> {
        self.storage
            .get_group(group_id)
            .await?
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))
    }

    async fn validate_group_membership(&self, group_id: &str, member_id: &str) -> Result<Group, LedgerError> {
        let group = self.get_group(group_id).await?;
        if !group.is_member(member_id) {
            warn!("Member {} is not in group {}", member_id, group_id);
            return Err(LedgerError::NotGroupMember(member_id.to_string()));
        }
        Ok(group)
    }

    async fn log_and_audit(
        &self,
        action: &str,
        details: serde_json::Value,
        member_id: Option<&str>,
    ) -> Result<(), LedgerError> {
        debug!("Audit {}: {}", action, details);
        self.logging.log_action(action, details, member_id).await
    }

    fn validate_string_input(&self, field: &str, value: &str, max_length: usize) -> Result<(), LedgerError> {
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, format!("Invalid {}", field), format!("{} cannot be empty", field)),
            ));
        }
        if value.chars().count() > max_length {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("{} Too Long", field),
                    format!("{} cannot exceed {} characters", field, max_length),
                ),
            ));
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    format!("Invalid {}", field),
                    format!("{} contains invalid characters", field),
                ),
            ));
        }
        Ok(())
    }

    fn validate_amount_input(&self, field: &str, amount: Money) -> Result<(), LedgerError> {
        if !amount.is_positive() {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(field, "Invalid Amount", "Amount must be greater than 0"),
            ));
        }
        if amount > self.max_expense_amount {
            return Err(LedgerError::InvalidInput(
                field.to_string(),
                FieldError::new(
                    field,
                    "Amount Too Large",
                    format!("Amount cannot exceed {}", self.max_expense_amount),
                ),
            ));
        }
        Ok(())
    }

    pub async fn add_expense(
        &self,
        group_id: &str,
        new_expense: NewExpense,
        added_by: &str,
    ) -> Result<Expense, LedgerError> {
        info!("Adding expense '{}' to group {} by {}", new_expense.title, group_id, added_by);
        let group = self.validate_group_membership(group_id, added_by).await?;

        self.validate_string_input("title", &new_expense.title, MAX_TITLE_LENGTH)?;
        self.validate_amount_input("amount", new_expense.amount)?;
        if !group.is_member(&new_expense.paid_by) {
            return Err(LedgerError::NotGroupMember(new_expense.paid_by));
        }
        if let Some(outsider) = new_expense
            .participants
            .iter()
            .find(|p| !group.is_member(&p.member_id))
        {
            return Err(LedgerError::NotGroupMember(outsider.member_id.clone()));
        }

        let existing = self.storage.get_expenses(group_id).await?;
        if existing.iter().any(|e| e.title == new_expense.title) {
            return Err(LedgerError::DuplicateExpenseTitle(new_expense.title));
        }

        let expense = Expense {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            title: new_expense.title,
            description: new_expense.description,
            amount: new_expense.amount,
            paid_by: new_expense.paid_by,
            participants: new_expense.participants,
            created_at: Utc::now(),
        };
        // Reject splits the calculator would refuse before they reach history.
        self.calculator.expense_deltas(&expense, &group.members)?;

        self.storage.save_expense(expense.clone()).await?;
        self.cache.invalidate_settlement_report(group_id).await?;

        self.log_and_audit(
            EXPENSE_ADDED,
            json!({
                "expense_id": expense.id,
                "group_id": group_id,
                "title": expense.title,
                "amount": expense.amount,
                "paid_by": expense.paid_by
            }),
            Some(added_by),
        )
        .await?;

        Ok(expense)
    }

    /// Expenses of a group, newest first.
    pub async fn list_expenses(&self, group_id: &str, queried_by: &str) -> Result<Vec<Expense>, LedgerError> {
        self.validate_group_membership(group_id, queried_by).await?;
        let mut expenses = self.storage.get_expenses(group_id).await?;
        expenses.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.log_and_audit(
            EXPENSES_QUERIED,
            json!({ "group_id": group_id, "count": expenses.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(expenses)
    }

    pub async fn get_expense(&self, group_id: &str, expense_id: &str, queried_by: &str) -> Result<Expense, LedgerError> {
        self.validate_group_membership(group_id, queried_by).await?;
        self.find_expense(group_id, expense_id).await
    }

    async fn find_expense(&self, group_id: &str, expense_id: &str) -> Result<Expense, LedgerError> {
        self.storage
            .get_expenses(group_id)
            .await?
            .into_iter()
            .find(|e| e.id == expense_id)
            .ok_or_else(|| LedgerError::ExpenseNotFound(expense_id.to_string()))
    }

    /// Replaces an expense's details. When participants are given their
    /// shares become the amount.
    pub async fn update_expense(
        &self,
        group_id: &str,
        expense_id: &str,
        changes: NewExpense,
        updated_by: &str,
    ) -> Result<Expense, LedgerError> {
        info!("Updating expense {} in group {} by {}", expense_id, group_id, updated_by);
        let group = self.validate_group_membership(group_id, updated_by).await?;
        let current = self.find_expense(group_id, expense_id).await?;

        self.validate_string_input("title", &changes.title, MAX_TITLE_LENGTH)?;
        if !group.is_member(&changes.paid_by) {
            return Err(LedgerError::NotGroupMember(changes.paid_by));
        }
        if let Some(outsider) = changes.participants.iter().find(|p| !group.is_member(&p.member_id)) {
            return Err(LedgerError::NotGroupMember(outsider.member_id.clone()));
        }

        let existing = self.storage.get_expenses(group_id).await?;
        if existing.iter().any(|e| e.id != expense_id && e.title == changes.title) {
            return Err(LedgerError::DuplicateExpenseTitle(changes.title));
        }

        let amount = if changes.participants.is_empty() {
            changes.amount
        } else {
            Money::checked_sum("participant shares", changes.participants.iter().map(|p| p.paid_amt))?
        };
        self.validate_amount_input("amount", amount)?;

        let expense = Expense {
            id: current.id,
            group_id: current.group_id,
            title: changes.title,
            description: changes.description,
            amount,
            paid_by: changes.paid_by,
            participants: changes.participants,
            created_at: current.created_at,
        };
        self.calculator.expense_deltas(&expense, &group.members)?;

        self.storage.save_expense(expense.clone()).await?;
        self.cache.invalidate_settlement_report(group_id).await?;

        self.log_and_audit(
            EXPENSE_UPDATED,
            json!({
                "expense_id": expense.id,
                "group_id": group_id,
                "title": expense.title,
                "previous_amount": current.amount,
                "amount": expense.amount,
                "paid_by": expense.paid_by
            }),
            Some(updated_by),
        )
        .await?;

        Ok(expense)
    }

    /// Proposed payments that would settle a single expense on its own.
    pub async fn expense_transactions(
        &self,
        group_id: &str,
        expense_id: &str,
        queried_by: &str,
    ) -> Result<Vec<SettlementTransaction>, LedgerError> {
        let group = self.validate_group_membership(group_id, queried_by).await?;
        let expense = self.find_expense(group_id, expense_id).await?;

        let deltas = self.calculator.expense_deltas(&expense, &group.members)?;
        let suggestions = self.optimizer.optimize(&deltas)?;
        debug!("Expense {} settles in {} payments", expense_id, suggestions.len());

        Ok(SettlementOptimizer::into_transactions(
            &suggestions,
            group_id,
            Some(expense.id.as_str()),
            Utc::now(),
        ))
    }

    /// Balances and suggested payments for a group, served from cache until
    /// the next write to that group.
    pub async fn settlement_report(&self, group_id: &str) -> Result<SettlementReport, LedgerError> {
        if let Some(report) = self.cache.get_settlement_report(group_id).await? {
            debug!("Serving cached settlement report for group {}", group_id);
            return Ok(report);
        }

        let snapshot = self.storage.snapshot(group_id).await?;
        let balances = self.calculator.calculate_snapshot(&snapshot)?;
        let suggestions = self.optimizer.optimize(&balances)?;

        let report = SettlementReport {
            group_id: group_id.to_string(),
            balances: balances.to_list(),
            suggestions,
            computed_at: Utc::now(),
        };
        self.cache
            .save_settlement_report(group_id, &report, self.cache_ttl)
            .await?;

        Ok(report)
    }

    pub async fn group_balances(&self, group_id: &str, queried_by: &str) -> Result<Vec<MemberBalance>, LedgerError> {
        self.validate_group_membership(group_id, queried_by).await?;
        let report = self.settlement_report(group_id).await?;
        self.log_and_audit(
            BALANCES_QUERIED,
            json!({ "group_id": group_id }),
            Some(queried_by),
        )
        .await?;
        Ok(report.balances)
    }

    pub async fn suggested_settlements(
        &self,
        group_id: &str,
        queried_by: &str,
    ) -> Result<Vec<SuggestedTransaction>, LedgerError> {
        self.validate_group_membership(group_id, queried_by).await?;
        let report = self.settlement_report(group_id).await?;
        self.log_and_audit(
            SETTLEMENTS_SUGGESTED,
            json!({ "group_id": group_id, "count": report.suggestions.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(report.suggestions)
    }

    pub async fn member_summary(&self, group_id: &str, member_id: &str) -> Result<MemberSummary, LedgerError> {
        self.validate_group_membership(group_id, member_id).await?;
        let report = self.settlement_report(group_id).await?;

        let balance = report
            .balances
            .iter()
            .find(|b| b.member_id == member_id)
            .map(|b| b.balance)
            .unwrap_or(Money::ZERO);
        let (pays, receives): (Vec<_>, Vec<_>) = report
            .suggestions
            .into_iter()
            .filter(|s| s.debtor_id == member_id || s.creditor_id == member_id)
            .partition(|s| s.debtor_id == member_id);

        Ok(MemberSummary {
            member_id: member_id.to_string(),
            balance,
            pays,
            receives,
        })
    }

    /// Appends an actual payment to the group's history.
    pub async fn record_payment(
        &self,
        group_id: &str,
        debtor: &str,
        creditor: &str,
        payment: Money,
        recorded_by: &str,
    ) -> Result<SettlementTransaction, LedgerError> {
        info!(
            "Recording payment of {} from {} to {} in group {}",
            payment, debtor, creditor, group_id
        );
        let group = self.validate_group_membership(group_id, recorded_by).await?;
        for party in [debtor, creditor] {
            if !group.is_member(party) {
                return Err(LedgerError::NotGroupMember(party.to_string()));
            }
        }
        if debtor == creditor {
            return Err(LedgerError::SelfSettlement(debtor.to_string()));
        }
        if !payment.is_positive() {
            return Err(LedgerError::InvalidInput(
                "payment".to_string(),
                FieldError::new("payment", "Invalid Payment", "Payment amount must be greater than 0"),
            ));
        }

        let settlement = SettlementTransaction {
            id: Uuid::new_v4().to_string(),
            group_id: group_id.to_string(),
            debtor: debtor.to_string(),
            creditor: creditor.to_string(),
            payment,
            kind: TransactionKind::Actual,
            expense_id: None,
            created_at: Utc::now(),
        };

        self.storage.save_settlement(settlement.clone()).await?;
        self.cache.invalidate_settlement_report(group_id).await?;

        self.log_and_audit(
            PAYMENT_RECORDED,
            json!({
                "settlement_id": settlement.id,
                "group_id": group_id,
                "debtor": debtor,
                "creditor": creditor,
                "payment": payment
            }),
            Some(recorded_by),
        )
        .await?;

        Ok(settlement)
    }

    /// Recorded payments, newest first.
    pub async fn transaction_history(
        &self,
        group_id: &str,
        queried_by: &str,
    ) -> Result<Vec<SettlementTransaction>, LedgerError> {
        self.validate_group_membership(group_id, queried_by).await?;
        let mut history: Vec<SettlementTransaction> = self
            .storage
            .get_settlements(group_id)
            .await?
            .into_iter()
            .filter(SettlementTransaction::is_actual)
            .collect();
        history.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        self.log_and_audit(
            HISTORY_QUERIED,
            json!({ "group_id": group_id, "count": history.len() }),
            Some(queried_by),
        )
        .await?;
        Ok(history)
    }
}
