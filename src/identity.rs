//! Bot display identity, resolved best-effort after startup.
//!
//! `getMe` runs in a spawned task (see [`crate::telegram::runner`]), so the
//! first turns may run before the name is known; they read the placeholder.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Sender name used for the bot's context records before `getMe` resolves.
pub const UNRESOLVED_BOT_NAME: &str = "Bot";

/// Unresolved-or-resolved display name cell, shared between the startup
/// resolution task and the turn processor.
#[derive(Clone, Default)]
pub struct BotIdentity {
    name: Arc<RwLock<Option<String>>>,
}

impl BotIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores the resolved display name. Later reads return it.
    pub async fn resolve(&self, name: String) {
        *self.name.write().await = Some(name);
    }

    /// Current display name; [`UNRESOLVED_BOT_NAME`] until resolved.
    pub async fn display_name(&self) -> String {
        self.name
            .read()
            .await
            .clone()
            .unwrap_or_else(|| UNRESOLVED_BOT_NAME.to_string())
    }
}
