//! # Webhook Wire Types
//!
//! Payload shapes for the provider's webhook callbacks. Field names mirror
//! the provider's JSON verbatim; everything here is request-scoped and
//! nothing outlives the handling of a single callback.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Top-level webhook payload wrapping one or more event entries.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WebhookEnvelope {
    /// Object type tag, e.g. "whatsapp_business_account"
    pub object: String,
    /// Event entries; an envelope with zero entries is valid but carries no
    /// actionable data
    #[serde(default)]
    pub entry: Vec<Entry>,
}

/// One event entry inside an envelope.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Entry {
    pub id: String,
    #[serde(default)]
    pub changes: Vec<Change>,
}

/// A single change within an entry.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Change {
    /// Field discriminator, e.g. "messages"
    pub field: String,
    pub value: ChangeValue,
}

/// Change payload carrying status updates and/or inbound messages.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangeValue {
    pub messaging_product: String,
    pub metadata: ChangeMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<StatusUpdate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<Vec<InboundMessage>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChangeMetadata {
    pub display_phone_number: String,
    pub phone_number_id: String,
}

/// Delivery-status record for a previously sent message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusUpdate {
    /// Provider identifier of the message this status refers to
    pub id: String,
    /// Free-form status string, e.g. "sent", "delivered", "read"
    pub status: String,
    pub timestamp: String,
    pub recipient_id: String,
}

/// Inbound user message. Received but not acted upon.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InboundMessage {
    pub from: String,
    pub id: String,
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<MessageText>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageText {
    pub body: String,
}

impl WebhookEnvelope {
    /// First status record of the first change of the first entry, if present.
    ///
    /// The persistence path only ever consumes this one record; a payload
    /// without it carries nothing to persist.
    pub fn first_status(&self) -> Option<&StatusUpdate> {
        self.entry
            .first()?
            .changes
            .first()?
            .value
            .statuses
            .as_ref()?
            .first()
    }
}

/// Query parameters for the provider's subscription-verification handshake.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct VerifyParams {
    /// Handshake mode; the provider sends "subscribe"
    #[serde(rename = "hub.mode")]
    pub mode: Option<String>,
    /// Token that must match the configured verify token
    #[serde(rename = "hub.verify_token")]
    pub verify_token: Option<String>,
    /// Opaque challenge echoed back verbatim on success
    #[serde(rename = "hub.challenge")]
    pub challenge: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_payload() -> &'static str {
        r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550001111",
                            "phone_number_id": "106540352242922"
                        },
                        "statuses": [{
                            "id": "wamid.HBgLMTU1NTA=",
                            "status": "delivered",
                            "timestamp": "1700000000",
                            "recipient_id": "15557654321"
                        }]
                    }
                }]
            }]
        }"#
    }

    #[test]
    fn test_envelope_parses_provider_status_payload() {
        let envelope: WebhookEnvelope = serde_json::from_str(status_payload()).unwrap();

        let status = envelope.first_status().expect("status present");
        assert_eq!(status.id, "wamid.HBgLMTU1NTA=");
        assert_eq!(status.status, "delivered");
        assert_eq!(status.recipient_id, "15557654321");
    }

    #[test]
    fn test_envelope_without_entries_is_valid() {
        let envelope: WebhookEnvelope =
            serde_json::from_str(r#"{"object": "whatsapp_business_account", "entry": []}"#)
                .unwrap();

        assert!(envelope.entry.is_empty());
        assert!(envelope.first_status().is_none());
    }

    #[test]
    fn test_first_status_is_none_when_change_has_only_messages() {
        let payload = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550001111",
                            "phone_number_id": "106540352242922"
                        },
                        "messages": [{
                            "from": "15557654321",
                            "id": "wamid.inbound",
                            "timestamp": "1700000001",
                            "type": "text",
                            "text": { "body": "hello" }
                        }]
                    }
                }]
            }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(payload).unwrap();

        assert!(envelope.first_status().is_none());
        let message = envelope.entry[0].changes[0].value.messages.as_ref().unwrap();
        assert_eq!(message[0].kind, "text");
    }

    #[test]
    fn test_first_status_is_none_for_empty_statuses_array() {
        let payload = r#"{
            "object": "whatsapp_business_account",
            "entry": [{
                "id": "102290129340398",
                "changes": [{
                    "field": "messages",
                    "value": {
                        "messaging_product": "whatsapp",
                        "metadata": {
                            "display_phone_number": "15550001111",
                            "phone_number_id": "106540352242922"
                        },
                        "statuses": []
                    }
                }]
            }]
        }"#;

        let envelope: WebhookEnvelope = serde_json::from_str(payload).unwrap();
        assert!(envelope.first_status().is_none());
    }
}
