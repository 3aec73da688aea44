//! Delivery abstraction for outgoing replies.
//!
//! [`MessageSink`] is transport-agnostic; production uses the teloxide-backed
//! implementation in [`crate::telegram`], tests substitute recording mocks.

use async_trait::async_trait;

use crate::error::Result;

/// What the transport reports about a delivered message. Both fields feed the
/// bot's own context record for the reply.
#[derive(Debug, Clone, Copy)]
pub struct Delivery {
    /// Platform-assigned id of the sent message.
    pub message_id: i64,
    /// Delivery time, seconds since epoch.
    pub timestamp: i64,
}

/// Sends a text message to a chat.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, chat_id: i64, text: &str) -> Result<Delivery>;
}
