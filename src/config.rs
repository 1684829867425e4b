use dotenv::dotenv;
use once_cell::sync::Lazy;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    pub balance_cache_ttl_secs: u64,
    /// Largest absolute balance total the optimizer accepts, in minor units.
    pub settlement_tolerance_minor: i64,
    /// Reject expenses whose participant shares do not add up to the amount.
    pub strict_split_totals: bool,
    pub max_expense_amount_minor: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            balance_cache_ttl_secs: 3600,
            settlement_tolerance_minor: 0,
            strict_split_totals: false,
            max_expense_amount_minor: 100_000_000,
        }
    }
}

impl Config {
    fn from_env() -> Self {
        dotenv().ok();
        let defaults = Self::default();

        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            balance_cache_ttl_secs: parse_var("BALANCE_CACHE_TTL_SECS")
                .unwrap_or(defaults.balance_cache_ttl_secs),
            settlement_tolerance_minor: parse_var::<i64>("SETTLEMENT_TOLERANCE_MINOR")
                .map(i64::abs)
                .unwrap_or(defaults.settlement_tolerance_minor),
            strict_split_totals: parse_var("STRICT_SPLIT_TOTALS").unwrap_or(defaults.strict_split_totals),
            max_expense_amount_minor: parse_var("MAX_EXPENSE_AMOUNT_MINOR")
                .unwrap_or(defaults.max_expense_amount_minor),
        }
    }
}

fn parse_var<T: std::str::FromStr>(key: &str) -> Option<T> {
    env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

// Global static accessible everywhere
pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);
