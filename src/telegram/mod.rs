//! Telegram transport layer: event conversion, delivery sink, command
//! handling, and the REPL runner.

mod commands;
mod event;
mod runner;
mod sink;

pub use event::TelegramMessageWrapper;
pub use runner::run_repl;
pub use sink::TelegramSink;
