pub mod audit;
pub mod balance;
pub mod expense;
pub mod group;
pub mod money;
pub mod report;
pub mod settlement;
pub mod snapshot;

pub use audit::AppLog;
pub use balance::{Balances, MemberBalance};
pub use expense::{Expense, ExpenseParticipant, NewExpense};
pub use group::{Group, Member};
pub use money::Money;
pub use report::{MemberSummary, SettlementReport};
pub use settlement::{SettlementTransaction, SuggestedTransaction, TransactionKind};
pub use snapshot::LedgerSnapshot;
