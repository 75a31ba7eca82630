//! Arta recurring-posting runner.
//!
//! One-shot binary for cron-style invocation: runs the monthly budget cycle
//! and subscription due-processing against the remote store, then logs a
//! summary including the resulting net worth.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arta_core::clock::SystemClock;
use arta_core::ledger::net_worth;
use arta_engine::PostingScheduler;
use arta_shared::AppConfig;
use arta_store::RestStore;
use arta_store::traits::AccountStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arta=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;
    let store = Arc::new(RestStore::new(&config.api)?);
    info!(base_url = %config.api.base_url, "connected to remote store");

    let scheduler = PostingScheduler::new(Arc::clone(&store), SystemClock);

    match scheduler.run_budget_cycle().await? {
        Some(period) => info!(%period, "budget cycle processed"),
        None => info!("budget cycle already up to date"),
    }

    let posted = scheduler.process_due_subscriptions().await?;
    info!(posted, "subscription due-processing finished");

    let accounts = store.list_accounts().await?;
    info!(
        accounts = accounts.len(),
        net_worth = %net_worth(&accounts),
        "run complete"
    );

    Ok(())
}
