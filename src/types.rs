//! Core types: message records, the incoming event handed in by the transport,
//! and the outcome of one conversational turn.

use serde::{Deserialize, Serialize};

/// One message in a chat's rolling context window. Immutable once created.
///
/// `id` is the platform message id (unique within a chat at a point in time),
/// `timestamp` is seconds since epoch. Field names match the backend wire format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageRecord {
    pub id: i64,
    pub text: String,
    pub sender: String,
    pub timestamp: i64,
}

/// An incoming text message event, already stripped of transport detail.
///
/// Produced by the Telegram layer (see `telegram::event`); commands never
/// reach this type.
#[derive(Debug, Clone)]
pub struct IncomingMessage {
    pub chat_id: i64,
    pub user_id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub message_id: i64,
    pub text: String,
    pub timestamp: i64,
}

impl IncomingMessage {
    /// Sender display name: username, else first name, else `User_<id>`.
    pub fn sender_name(&self) -> String {
        self.username
            .clone()
            .or_else(|| self.first_name.clone())
            .unwrap_or_else(|| format!("User_{}", self.user_id))
    }

    /// Builds the context record for this event.
    pub fn to_record(&self) -> MessageRecord {
        MessageRecord {
            id: self.message_id,
            text: self.text.clone(),
            sender: self.sender_name(),
            timestamp: self.timestamp,
        }
    }
}

/// Resolution of one turn. `Failed` covers backend and delivery failures alike;
/// the distinction is in the logs, not in the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnOutcome {
    /// A reply was delivered and appended to context.
    Replied,
    /// The backend chose not to reply; context keeps only the incoming message.
    Declined,
    /// Backend or delivery failure; context keeps only the incoming message.
    Failed,
}
