pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::core::errors::{ErrorKind, LedgerError};
pub use crate::core::services::LedgerService;
pub use crate::core::{BalanceCalculator, SettlementOptimizer, SplitPolicy};
pub use crate::infrastructure::{
    cache::in_memory::InMemoryCache, logging::in_memory::InMemoryLogging, storage::in_memory::InMemoryStorage,
};

#[cfg(test)]
mod tests;
