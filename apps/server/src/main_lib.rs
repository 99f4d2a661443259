use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use tellerd_core::accounts::{AccountService, AccountServiceTrait};
use tellerd_core::transactions::{TransactionService, TransactionServiceTrait};
use tellerd_storage_sqlite::accounts::AccountRepository;
use tellerd_storage_sqlite::transactions::TransactionRepository;
use tellerd_storage_sqlite::{create_pool, init, run_migrations, spawn_writer};

use crate::config::Config;

/// Shared handles to the ledger services, cloned into every connection
/// worker.
#[derive(Clone)]
pub struct AppState {
    pub accounts: Arc<dyn AccountServiceTrait>,
    pub transactions: Arc<dyn TransactionServiceTrait>,
}

pub fn init_tracing() {
    let log_format = std::env::var("TELLERD_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true))
            .init();
    }
}

/// Opens the database, runs migrations, spawns the single-writer actor, and
/// wires repositories into services.
pub async fn build_state(config: &Config) -> anyhow::Result<AppState> {
    let db_path = init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer((*pool).clone());

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool, writer));

    Ok(AppState {
        accounts: Arc::new(AccountService::new(account_repository)),
        transactions: Arc::new(TransactionService::new(transaction_repository)),
    })
}
