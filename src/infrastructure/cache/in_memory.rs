use crate::core::errors::LedgerError;
use crate::core::models::SettlementReport;
use crate::infrastructure::cache::{Cache, cache_keys::settlement_report_key};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Default)]
pub struct InMemoryCache {
    cache: Arc<RwLock<HashMap<String, (SettlementReport, DateTime<Utc>)>>>,
}

impl InMemoryCache {
    pub fn new() -> Self {
        InMemoryCache {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_settlement_report(&self, group_id: &str) -> Result<Option<SettlementReport>, LedgerError> {
        let cache = self.cache.read().await;
        let now = Utc::now();
        Ok(cache
            .get(&settlement_report_key(group_id))
            .filter(|(_, expiry)| *expiry > now)
            .map(|(report, _)| report.clone()))
    }

    async fn save_settlement_report(
        &self,
        group_id: &str,
        report: &SettlementReport,
        ttl: std::time::Duration,
    ) -> Result<(), LedgerError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| LedgerError::CacheError(format!("Failed to convert TTL: {}", e)))?;
        let mut cache = self.cache.write().await;
        cache.insert(settlement_report_key(group_id), (report.clone(), Utc::now() + ttl));
        Ok(())
    }

    async fn invalidate_settlement_report(&self, group_id: &str) -> Result<(), LedgerError> {
        let mut cache = self.cache.write().await;
        cache.remove(&settlement_report_key(group_id));
        let now = Utc::now();
        cache.retain(|_, (_, expiry)| *expiry > now);
        Ok(())
    }
}
