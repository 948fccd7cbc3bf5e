//! Direct message models.

use serde::{Deserialize, Serialize};

use super::{CreatedAt, EventId, UserId};

/// A direct-message event envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageEvent {
    /// Event ID.
    pub id: EventId,
    /// Event type, `message_create` for messages.
    #[serde(default, rename = "type")]
    pub kind: String,
    /// Creation time as epoch milliseconds.
    pub created_timestamp: CreatedAt,
    /// Message payload.
    pub message_create: MessageCreate,
}

impl MessageEvent {
    /// Sender user ID.
    pub fn sender_id(&self) -> &UserId {
        &self.message_create.sender_id
    }

    /// Message text.
    pub fn text(&self) -> &str {
        &self.message_create.message_data.text
    }

    /// Check whether this message was sent by the given user.
    pub fn is_from(&self, user_id: &UserId) -> bool {
        self.message_create.sender_id == *user_id
    }
}

/// The `message_create` payload of an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageCreate {
    /// Sender user ID.
    pub sender_id: UserId,
    /// Recipient.
    #[serde(default)]
    pub target: MessageTarget,
    /// Message body.
    #[serde(default)]
    pub message_data: MessageData,
}

/// Recipient of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageTarget {
    /// Recipient user ID.
    pub recipient_id: UserId,
}

/// Body of a message.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MessageData {
    /// Message text.
    #[serde(default)]
    pub text: String,
}

/// Response of the direct-message events endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventsPage {
    /// Events, most recent first.
    #[serde(default)]
    pub events: Vec<MessageEvent>,
    /// Cursor for the next page.
    #[serde(default)]
    pub next_cursor: Option<String>,
}
