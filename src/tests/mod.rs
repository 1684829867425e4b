mod property_tests;
mod settlement_tests;

use crate::config::Config;
use crate::core::models::{
    Balances, Expense, ExpenseParticipant, Group, Member, Money, SettlementTransaction, TransactionKind,
};
use crate::core::services::LedgerService;
use crate::infrastructure::cache::in_memory::InMemoryCache;
use crate::infrastructure::logging::in_memory::InMemoryLogging;
use crate::infrastructure::storage::Storage;
use crate::infrastructure::storage::in_memory::InMemoryStorage;
use chrono::{TimeZone, Utc};

pub type TestService = LedgerService<InMemoryLogging, InMemoryStorage, InMemoryCache>;

pub const GROUP_ID: &str = "g1";

pub fn create_test_service() -> TestService {
    let storage = InMemoryStorage::new();
    let logging = InMemoryLogging::new();
    let cache = InMemoryCache::new();
    LedgerService::with_config(storage, logging, cache, &Config::default())
}

/// Service holding group `g1` with members a, b and c.
pub async fn seeded_service() -> TestService {
    let _ = env_logger::try_init();
    let service = create_test_service();
    service
        .storage()
        .save_group(Group {
            id: GROUP_ID.to_string(),
            name: "Trip".to_string(),
            admin_id: "a".to_string(),
            members: members(&["a", "b", "c"]),
        })
        .await
        .unwrap();
    service
}

pub fn members(ids: &[&str]) -> Vec<Member> {
    ids.iter().map(|id| Member::new(*id, id.to_uppercase(), true)).collect()
}

pub fn expense(id: &str, paid_by: &str, amount: Money, shares: &[(&str, Money)]) -> Expense {
    Expense {
        id: id.to_string(),
        group_id: GROUP_ID.to_string(),
        title: format!("Expense {}", id),
        description: None,
        amount,
        paid_by: paid_by.to_string(),
        participants: shares
            .iter()
            .map(|(member_id, share)| ExpenseParticipant::new(*member_id, *share))
            .collect(),
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
    }
}

pub fn payment(id: &str, debtor: &str, creditor: &str, amount: Money) -> SettlementTransaction {
    SettlementTransaction {
        id: id.to_string(),
        group_id: GROUP_ID.to_string(),
        debtor: debtor.to_string(),
        creditor: creditor.to_string(),
        payment: amount,
        kind: TransactionKind::Actual,
        expense_id: None,
        created_at: Utc.with_ymd_and_hms(2026, 1, 2, 12, 0, 0).unwrap(),
    }
}

pub fn balances(entries: &[(&str, i64)]) -> Balances {
    entries
        .iter()
        .map(|(id, minor)| (*id, Money::from_minor(*minor)))
        .collect()
}
