use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, LedgerSnapshot, SettlementTransaction};
use async_trait::async_trait;

#[async_trait]
pub trait Storage: Send + Sync {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError>;
    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError>;
    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError>;
    async fn get_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError>;
    async fn save_settlement(&self, settlement: SettlementTransaction) -> Result<(), LedgerError>;
    async fn get_settlements(&self, group_id: &str) -> Result<Vec<SettlementTransaction>, LedgerError>;
    /// Members, expenses and settlements read under one consistent view.
    async fn snapshot(&self, group_id: &str) -> Result<LedgerSnapshot, LedgerError>;
}

pub mod in_memory;
