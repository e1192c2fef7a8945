//! # Server Configuration
//!
//! This module contains the server setup and configuration for the status
//! webhook service.

use axum::{Router, routing::get};
use sea_orm::DatabaseConnection;
use tokio_util::task::TaskTracker;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::AppConfig;
use crate::handlers::webhooks;

/// Application state containing shared resources.
///
/// Established once at startup and treated as read-only thereafter; requests
/// share the store pool and configuration but no other mutable state.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: AppConfig,
    /// Tracks detached status writes so shutdown can drain them.
    pub tasks: TaskTracker,
}

impl AppState {
    pub fn new(config: AppConfig, db: DatabaseConnection) -> Self {
        Self {
            db,
            config,
            tasks: TaskTracker::new(),
        }
    }
}

/// Creates and configures the Axum application router.
///
/// The webhook surface is a single route dispatching on method; every other
/// verb gets the provider-visible 405 body.
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route(
            "/",
            get(webhooks::verify_webhook)
                .post(webhooks::receive_webhook)
                .fallback(webhooks::method_not_allowed),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
}

/// Starts the server with the given configuration.
///
/// Serves until interrupted, then waits for detached status writes still in
/// flight before returning.
pub async fn run_server(
    config: AppConfig,
    db: DatabaseConnection,
) -> Result<(), Box<dyn std::error::Error>> {
    // Resolve the configured bind address
    let addr = config
        .bind_addr()
        .map_err(|e| format!("Invalid server address: {}", e))?;

    let state = AppState::new(config, db);
    let tasks = state.tasks.clone();
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The response path never awaits status writes, so some may still be in
    // flight here.
    tasks.close();
    info!(pending = tasks.len(), "draining detached status writes");
    tasks.wait().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::webhooks::verify_webhook,
        crate::handlers::webhooks::receive_webhook,
    ),
    components(
        schemas(
            crate::handlers::types::WebhookEnvelope,
            crate::handlers::types::Entry,
            crate::handlers::types::Change,
            crate::handlers::types::ChangeValue,
            crate::handlers::types::ChangeMetadata,
            crate::handlers::types::StatusUpdate,
            crate::handlers::types::InboundMessage,
            crate::handlers::types::MessageText,
        )
    ),
    info(
        title = "WhatsApp Status Webhook",
        description = "Webhook receiver persisting message delivery statuses",
        version = env!("CARGO_PKG_VERSION"),
    )
)]
pub struct ApiDoc;
