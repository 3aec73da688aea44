//! Conversion from teloxide messages to the core incoming-event type.

use crate::types::IncomingMessage;

/// Wraps a teloxide message for conversion into [`IncomingMessage`].
pub struct TelegramMessageWrapper<'a>(pub &'a teloxide::types::Message);

impl<'a> TelegramMessageWrapper<'a> {
    /// Builds the core event for a text message; `None` for anything else.
    /// A missing sender (e.g. channel post) maps to user id 0 with no names,
    /// so the core falls back to its synthesized placeholder.
    pub fn to_incoming(&self) -> Option<IncomingMessage> {
        let text = self.0.text()?;
        let (user_id, username, first_name) = match self.0.from.as_ref() {
            Some(user) => (
                user.id.0 as i64,
                user.username.clone(),
                Some(user.first_name.clone()),
            ),
            None => (0, None, None),
        };

        Some(IncomingMessage {
            chat_id: self.0.chat.id.0,
            user_id,
            username,
            first_name,
            message_id: self.0.id.0 as i64,
            text: text.to_string(),
            timestamp: self.0.date.timestamp(),
        })
    }
}
