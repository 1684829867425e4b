pub mod cache_keys;
pub mod in_memory;

use crate::core::errors::LedgerError;
use crate::core::models::SettlementReport;
use async_trait::async_trait;

#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_settlement_report(&self, group_id: &str) -> Result<Option<SettlementReport>, LedgerError>;
    async fn save_settlement_report(
        &self,
        group_id: &str,
        report: &SettlementReport,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError>;
    async fn invalidate_settlement_report(&self, group_id: &str) -> Result<(), LedgerError>;
}
