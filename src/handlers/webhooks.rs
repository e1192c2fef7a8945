//! # Webhook Handlers
//!
//! This module contains the handlers for the provider's webhook callbacks:
//! the GET subscription handshake and the POST event delivery. The provider
//! retries aggressively on non-200 responses, so the event path acknowledges
//! every delivery with 200 and keeps processing failures internal.

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use metrics::counter;
use sea_orm::DatabaseConnection;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::error::RepositoryError;
use crate::handlers::types::{VerifyParams, WebhookEnvelope};
use crate::repositories::MessageStatusRepository;
use crate::server::AppState;

/// Acknowledgement body the provider expects for every event delivery.
const EVENT_RECEIVED: &str = "EVENT_RECEIVED";

/// Verify webhook subscription
///
/// The provider sends a GET with `hub.mode=subscribe`, the configured verify
/// token and an opaque challenge. Echoing the challenge back confirms
/// endpoint ownership and activates event delivery.
#[utoipa::path(
    get,
    path = "/",
    params(VerifyParams),
    responses(
        (status = 200, description = "Subscription verified; body echoes the challenge", body = String),
        (status = 403, description = "Mode or token mismatch", body = String)
    ),
    tag = "webhook"
)]
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<VerifyParams>,
) -> (StatusCode, String) {
    let mode_ok = params.mode.as_deref() == Some("subscribe");
    let token_ok = match params.verify_token.as_deref() {
        // Constant-time comparison to prevent timing attacks on the token.
        Some(token) => subtle::ConstantTimeEq::ct_eq(
            token.as_bytes(),
            state.config.verify_token.as_bytes(),
        )
        .into(),
        None => false,
    };

    if mode_ok && token_ok {
        info!("webhook subscription verified");
        return (StatusCode::OK, params.challenge.unwrap_or_default());
    }

    // The presented token stays out of the log line.
    warn!(
        mode = params.mode.as_deref().unwrap_or(""),
        "webhook verification attempt rejected"
    );
    (StatusCode::FORBIDDEN, "Invalid token".to_string())
}

/// Receive webhook events
///
/// Always answers 200 "EVENT_RECEIVED": a non-200 would only make the
/// provider redeliver a payload we already know we cannot process, so parse
/// failures are logged and swallowed. The status write runs detached from
/// the response path and its outcome is observable only through logs and
/// store state.
#[utoipa::path(
    post,
    path = "/",
    request_body(content = WebhookEnvelope, content_type = "application/json"),
    responses(
        (status = 200, description = "Event acknowledged", body = String)
    ),
    tag = "webhook"
)]
pub async fn receive_webhook(
    State(state): State<AppState>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    debug!(body_size = body.len(), "webhook event received");
    counter!("webhook_events_received_total").increment(1);

    let envelope: WebhookEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => {
            error!(error = %e, "failed to parse webhook payload");
            counter!("webhook_events_malformed_total").increment(1);
            return (StatusCode::OK, EVENT_RECEIVED);
        }
    };

    if envelope.entry.is_empty() {
        warn!(object = %envelope.object, "webhook without entries, ignoring");
        return (StatusCode::OK, EVENT_RECEIVED);
    }

    // Detach the store write so the acknowledgement never waits on it. The
    // tracker lets shutdown drain writes still in flight.
    let db = state.db.clone();
    state.tasks.spawn(async move {
        if let Err(e) = save_message_status(&db, envelope).await {
            error!(error = %e, "background status persistence failed");
        }
    });

    (StatusCode::OK, EVENT_RECEIVED)
}

/// Reject verbs other than GET and POST with the provider-visible 405 body.
pub async fn method_not_allowed() -> impl IntoResponse {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "error": "Method not allowed" })),
    )
}

/// Persist the envelope's first status record to the messages_status table.
///
/// Status records beyond the first, and inbound messages, are received but
/// not acted upon. An envelope whose entries carry no status record is
/// dropped with a warning rather than treated as an error.
async fn save_message_status(
    db: &DatabaseConnection,
    envelope: WebhookEnvelope,
) -> Result<(), RepositoryError> {
    let Some(status) = envelope.first_status() else {
        warn!("webhook entry carried no status update, dropping");
        return Ok(());
    };

    let normalized = status.status.to_uppercase();
    let repo = MessageStatusRepository::new(db);

    match repo.insert(&status.id, &normalized).await {
        Ok(_) => {
            info!(
                message_id = %status.id,
                status = %normalized,
                "message status persisted"
            );
            counter!("webhook_status_writes_total").increment(1);
            Ok(())
        }
        Err(e) => {
            error!(
                error = %e,
                message_id = %status.id,
                "failed to persist message status"
            );
            counter!("webhook_status_writes_failed_total").increment(1);
            Err(e)
        }
    }
}
