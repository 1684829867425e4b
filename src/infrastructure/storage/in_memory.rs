use crate::core::errors::LedgerError;
use crate::core::models::{Expense, Group, LedgerSnapshot, SettlementTransaction};
use crate::infrastructure::storage::Storage;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

#[derive(Default)]
struct State {
    groups: HashMap<String, Group>,
    expenses: HashMap<String, Vec<Expense>>,
    settlements: HashMap<String, Vec<SettlementTransaction>>,
}

/// All tables sit behind one lock so a snapshot never observes a
/// half-applied write.
#[derive(Default)]
pub struct InMemoryStorage {
    state: Mutex<State>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        InMemoryStorage {
            state: Mutex::new(State::default()),
        }
    }
}

#[async_trait]
impl Storage for InMemoryStorage {
    async fn save_group(&self, group: Group) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;
        state.groups.insert(group.id.clone(), group);
        Ok(())
    }

    async fn get_group(&self, group_id: &str) -> Result<Option<Group>, LedgerError> {
        Ok(self.state.lock().await.groups.get(group_id).cloned())
    }

    async fn save_expense(&self, expense: Expense) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;
        if !state.groups.contains_key(&expense.group_id) {
            return Err(LedgerError::GroupNotFound(expense.group_id));
        }
        let expenses = state.expenses.entry(expense.group_id.clone()).or_default();
        match expenses.iter_mut().find(|e| e.id == expense.id) {
            Some(existing) => *existing = expense,
            None => expenses.push(expense),
        }
        Ok(())
    }

    async fn get_expenses(&self, group_id: &str) -> Result<Vec<Expense>, LedgerError> {
        let state = self.state.lock().await;
        Ok(state.expenses.get(group_id).cloned().unwrap_or_default())
    }

    async fn save_settlement(&self, settlement: SettlementTransaction) -> Result<(), LedgerError> {
        let mut state = self.state.lock().await;
        if !state.groups.contains_key(&settlement.group_id) {
            return Err(LedgerError::GroupNotFound(settlement.group_id));
        }
        state
            .settlements
            .entry(settlement.group_id.clone())
            .or_default()
            .push(settlement);
        Ok(())
    }

    async fn get_settlements(&self, group_id: &str) -> Result<Vec<SettlementTransaction>, LedgerError> {
        let state = self.state.lock().await;
        Ok(state.settlements.get(group_id).cloned().unwrap_or_default())
    }

    async fn snapshot(&self, group_id: &str) -> Result<LedgerSnapshot, LedgerError> {
        let state = self.state.lock().await;
        let group = state
            .groups
            .get(group_id)
            .ok_or_else(|| LedgerError::GroupNotFound(group_id.to_string()))?;
        Ok(LedgerSnapshot {
            group_id: group_id.to_string(),
            members: group.members.clone(),
            expenses: state.expenses.get(group_id).cloned().unwrap_or_default(),
            settlements: state.settlements.get(group_id).cloned().unwrap_or_default(),
        })
    }
}
