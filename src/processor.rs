//! Turn processor: drives one incoming message through context update,
//! backend call, and conditional reply delivery.
//!
//! One turn: append incoming record → snapshot → call the generator with the
//! snapshot → on a reply, deliver it and append the bot's record. The bound
//! is re-enforced inside each append, so it holds at every point an outside
//! observer can see. Backend and delivery failures end the turn with no
//! further context mutation and no retry.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{error, info, instrument, warn};

use crate::backend::{GenerateError, ReplyGenerator};
use crate::context::ContextStore;
use crate::identity::BotIdentity;
use crate::sink::MessageSink;
use crate::types::{IncomingMessage, MessageRecord, TurnOutcome};

/// Orchestrates turns against an injected store, generator, and sink.
///
/// Turns for the same chat are serialized through a per-chat mutex, so two
/// messages arriving back-to-back cannot interleave their appends around the
/// backend await. Turns for different chats run independently.
pub struct TurnProcessor {
    store: Arc<ContextStore>,
    generator: Arc<dyn ReplyGenerator>,
    sink: Arc<dyn MessageSink>,
    identity: BotIdentity,
    // Per-chat turn locks; entries live as long as the store's, for the process lifetime.
    turn_locks: Mutex<HashMap<i64, Arc<Mutex<()>>>>,
}

impl TurnProcessor {
    pub fn new(
        store: Arc<ContextStore>,
        generator: Arc<dyn ReplyGenerator>,
        sink: Arc<dyn MessageSink>,
        identity: BotIdentity,
    ) -> Self {
        Self {
            store,
            generator,
            sink,
            identity,
            turn_locks: Mutex::new(HashMap::new()),
        }
    }

    async fn turn_lock(&self, chat_id: i64) -> Arc<Mutex<()>> {
        let mut locks = self.turn_locks.lock().await;
        locks.entry(chat_id).or_default().clone()
    }

    /// Processes one incoming message to its (possible) reply.
    ///
    /// Never returns an error: every failure mode is logged and folded into
    /// [`TurnOutcome`], so a bad turn cannot take down the message loop.
    #[instrument(skip(self, event), fields(chat_id = event.chat_id, message_id = event.message_id))]
    pub async fn process(&self, event: IncomingMessage) -> TurnOutcome {
        let lock = self.turn_lock(event.chat_id).await;
        let _guard = lock.lock().await;
        let started = Instant::now();

        let chat_id = event.chat_id;
        let record = event.to_record();

        info!(
            chat_id,
            sender = %record.sender,
            text_len = record.text.len(),
            "received message"
        );

        self.store.append(chat_id, record.clone()).await;
        let history = self.store.snapshot(chat_id).await;
        info!(chat_id, context_len = history.len(), "context updated with user message");

        let outcome = match self.generator.generate(chat_id, &record, &history).await {
            Ok(Some(text)) => self.deliver_and_record(chat_id, &text).await,
            Ok(None) => {
                info!(chat_id, "backend declined to reply");
                TurnOutcome::Declined
            }
            Err(e) => {
                match &e {
                    GenerateError::ErrorStatus(status) => {
                        error!(chat_id, status, "backend responded with error status");
                    }
                    GenerateError::NoResponse(detail) => {
                        error!(chat_id, detail = %detail, "no response received from backend");
                    }
                    GenerateError::MalformedResponse(detail) => {
                        error!(chat_id, detail = %detail, "backend response was malformed");
                    }
                    GenerateError::Other(detail) => {
                        error!(chat_id, detail = %detail, "unexpected error calling backend");
                    }
                }
                TurnOutcome::Failed
            }
        };

        info!(
            chat_id,
            outcome = ?outcome,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "turn finished"
        );
        outcome
    }

    /// Sends `text` and, on success, appends the bot's record. A delivery
    /// failure leaves context untouched: the sent message's effect is unknown.
    async fn deliver_and_record(&self, chat_id: i64, text: &str) -> TurnOutcome {
        let delivery = match self.sink.send(chat_id, text).await {
            Ok(d) => d,
            Err(e) => {
                warn!(chat_id, error = %e, "failed to deliver reply");
                return TurnOutcome::Failed;
            }
        };

        let bot_record = MessageRecord {
            id: delivery.message_id,
            text: text.to_string(),
            sender: self.identity.display_name().await,
            timestamp: delivery.timestamp,
        };
        self.store.append(chat_id, bot_record).await;

        info!(
            chat_id,
            reply_message_id = delivery.message_id,
            "reply sent and added to context"
        );
        TurnOutcome::Replied
    }
}
