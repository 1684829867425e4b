pub mod balance_calculator;
pub mod constants;
pub mod errors;
pub mod models;
pub mod services;
pub mod settlement_optimizer;

pub use balance_calculator::{BalanceCalculator, SplitPolicy};
pub use settlement_optimizer::SettlementOptimizer;
