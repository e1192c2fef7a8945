//! # Status Webhook Main Entry Point
//!
//! This is the main entry point for the delivery-status webhook service.

use migration::{Migrator, MigratorTrait};
use wa_webhook::{config::ConfigLoader, db, server::run_server, telemetry};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration from layered env files and variables; a missing
    // database URL or verify token aborts startup before any traffic is served.
    let config = ConfigLoader::new().load()?;

    telemetry::init_tracing(&config)?;

    tracing::info!(profile = %config.profile, "configuration loaded");
    if let Ok(redacted) = config.redacted_json() {
        tracing::debug!(config = %redacted, "effective configuration");
    }

    // Bring up the status store before accepting webhooks.
    let db = db::init_pool(&config).await?;
    Migrator::up(&db, None).await?;
    db::health_check(&db).await?;

    run_server(config, db).await
}
