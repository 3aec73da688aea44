//! # relay-bot
//!
//! Telegram group-chat bot that keeps a bounded rolling window of recent
//! messages per chat, forwards each incoming message plus that window to an
//! external reply-generation backend over HTTP, and relays any returned text
//! back into the chat.
//!
//! Core pieces: [`ContextStore`] (bounded per-chat history) and
//! [`TurnProcessor`] (one message → context update → backend call →
//! conditional reply). The Telegram transport and the HTTP backend sit
//! behind seams ([`MessageSink`], [`ReplyGenerator`]) so tests run against
//! mocks.

pub mod backend;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod identity;
pub mod logger;
pub mod processor;
pub mod runner;
pub mod sink;
pub mod telegram;
pub mod types;

pub use backend::{GenerateError, HttpReplyGenerator, ReplyGenerator};
pub use cli::{load_config, Cli, Commands};
pub use config::BotConfig;
pub use context::ContextStore;
pub use error::{RelayError, Result};
pub use identity::{BotIdentity, UNRESOLVED_BOT_NAME};
pub use logger::init_tracing;
pub use processor::TurnProcessor;
pub use runner::run_bot;
pub use sink::{Delivery, MessageSink};
pub use types::{IncomingMessage, MessageRecord, TurnOutcome};
