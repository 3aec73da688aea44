//! Per-chat rolling context window.
//!
//! [`ContextStore`] maps chat id to an ordered, size-bounded history of
//! [`MessageRecord`]s. It is the sole source of truth for what a chat has
//! said recently; the turn processor appends to it and snapshots from it.
//!
//! The bound is enforced inside every [`append`](ContextStore::append), so
//! history length never observably exceeds `max_context` and eviction is
//! strictly oldest-first, regardless of whether the evicted record came from
//! a user or from the bot.

use std::collections::{HashMap, VecDeque};

use tokio::sync::Mutex;
use tracing::debug;

use crate::types::MessageRecord;

/// Bounded per-chat message history. Entries are created lazily on first
/// append and live for the process lifetime; nothing is persisted.
pub struct ContextStore {
    max_context: usize,
    chats: Mutex<HashMap<i64, VecDeque<MessageRecord>>>,
}

impl ContextStore {
    /// Creates a store whose per-chat histories hold at most `max_context` records.
    pub fn new(max_context: usize) -> Self {
        Self {
            max_context,
            chats: Mutex::new(HashMap::new()),
        }
    }

    /// Appends `record` to the history for `chat_id`, then evicts from the
    /// front until the bound holds. Infallible.
    pub async fn append(&self, chat_id: i64, record: MessageRecord) {
        let mut chats = self.chats.lock().await;
        let history = chats.entry(chat_id).or_default();
        history.push_back(record);
        while history.len() > self.max_context {
            history.pop_front();
        }
        debug!(chat_id, context_len = history.len(), "context updated");
    }

    /// Returns an owned copy of the current history for `chat_id`, oldest
    /// first; empty if the chat is unknown. A copy, not a live view: it is
    /// handed to a backend call that may outlast further appends.
    pub async fn snapshot(&self, chat_id: i64) -> Vec<MessageRecord> {
        let chats = self.chats.lock().await;
        chats
            .get(&chat_id)
            .map(|history| history.iter().cloned().collect())
            .unwrap_or_default()
    }
}
