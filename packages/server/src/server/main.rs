// Main entry point for the matchmaking service

use std::sync::Arc;

use anyhow::{Context, Result};
use server_core::common::utils::expo::ExpoClient;
use server_core::kernel::{
    scheduled_tasks, Deps, ExpoPushService, InMemoryMatchStore, InMemoryProfileService,
    TwilioMessenger,
};
use server_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use twilio::{TwilioOptions, TwilioService};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Pickup Sports matchmaking service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Delivery channels
    let twilio = Arc::new(TwilioService::new(TwilioOptions {
        account_sid: config.twilio_account_sid.clone(),
        auth_token: config.twilio_auth_token.clone(),
        from: config.twilio_from.clone(),
    }));
    let expo = Arc::new(ExpoClient::new(config.expo_access_token.clone()));

    // Collaborators. Storage and profiles default to the in-memory backends;
    // production deployments swap in their own BaseMatchStore /
    // BaseProfileService implementations here.
    let deps = Deps::new(
        Arc::new(InMemoryMatchStore::new()),
        Arc::new(InMemoryProfileService::new()),
        Arc::new(TwilioMessenger::new(twilio)),
        Arc::new(ExpoPushService::new(expo)),
    );

    // Start the lifecycle sweeps
    let mut scheduler = scheduled_tasks::start_scheduler(deps.clone())
        .await
        .context("Failed to start scheduler")?;

    tracing::info!("Service running; press Ctrl-C to stop");
    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;

    tracing::info!("Shutting down");
    scheduler.shutdown().await?;
    deps.notifier.flush().await;

    Ok(())
}
