//! Teloxide-backed implementation of [`MessageSink`]. Production sends via
//! Telegram; tests substitute another sink impl.

use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId};

use crate::error::{RelayError, Result};
use crate::sink::{Delivery, MessageSink};

/// Thin wrapper around teloxide::Bot that implements the delivery seam.
pub struct TelegramSink {
    bot: teloxide::Bot,
}

impl TelegramSink {
    /// Creates a sink from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl MessageSink for TelegramSink {
    async fn send(&self, chat_id: i64, text: &str) -> Result<Delivery> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(|e| RelayError::Bot(e.to_string()))?;
        Ok(Delivery {
            message_id: sent.id.0 as i64,
            timestamp: sent.date.timestamp(),
        })
    }
}
