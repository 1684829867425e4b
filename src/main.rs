use splitledger::config::CONFIG;
use splitledger::core::models::{Group, LedgerSnapshot};
use splitledger::infrastructure::storage::Storage;
use splitledger::{InMemoryCache, InMemoryLogging, InMemoryStorage, LedgerService};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Loads a group snapshot from a JSON file and prints its settlement report.
#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&CONFIG.log_level).unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: splitledger <snapshot.json>");
        return ExitCode::from(2);
    };

    match run(&path).await {
        Ok(report) => {
            println!("{}", report);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(path: &str) -> Result<String, Box<dyn std::error::Error>> {
    info!("Loading snapshot from {}", path);
    let raw = tokio::fs::read_to_string(path).await?;
    let snapshot: LedgerSnapshot = serde_json::from_str(&raw)?;

    let storage = InMemoryStorage::new();
    let admin_id = snapshot
        .members
        .iter()
        .find(|m| m.can_become_admin())
        .or_else(|| snapshot.members.first())
        .map(|m| m.id.clone())
        .unwrap_or_default();
    storage
        .save_group(Group {
            id: snapshot.group_id.clone(),
            name: snapshot.group_id.clone(),
            admin_id,
            members: snapshot.members.clone(),
        })
        .await?;
    for expense in snapshot.expenses {
        storage.save_expense(expense).await?;
    }
    for settlement in snapshot.settlements {
        storage.save_settlement(settlement).await?;
    }

    let service = LedgerService::new(storage, InMemoryLogging::new(), InMemoryCache::new());
    let report = service.settlement_report(&snapshot.group_id).await?;
    info!(
        "Group {} settles in {} payments",
        report.group_id,
        report.suggestions.len()
    );
    Ok(serde_json::to_string_pretty(&report)?)
}
