//! Main entry: validate config, init logging, build the store, backend
//! client, sink, and processor, then run the Telegram REPL.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::{info, warn};

use crate::backend::HttpReplyGenerator;
use crate::config::BotConfig;
use crate::context::ContextStore;
use crate::identity::BotIdentity;
use crate::logger::init_tracing;
use crate::processor::TurnProcessor;
use crate::telegram::{run_repl, TelegramSink};

/// Builds everything from config and runs until shutdown. Fatal config
/// errors return before any turn processing begins.
pub async fn run_bot(config: BotConfig) -> Result<()> {
    config.validate()?;
    std::fs::create_dir_all("logs")?;
    init_tracing(&config.log_file)?;

    if config.admin_id.is_none() {
        warn!("ADMIN_TELEGRAM_ID not set; admin commands are disabled");
    }

    info!(
        backend_url = %config.backend_url,
        max_context = config.max_context,
        timeout_secs = config.backend_timeout_secs,
        "initializing bot"
    );

    let bot = teloxide::Bot::new(config.bot_token.clone());

    let store = Arc::new(ContextStore::new(config.max_context));
    let generator = Arc::new(HttpReplyGenerator::new(
        config.backend_url.clone(),
        Duration::from_secs(config.backend_timeout_secs),
    )?);
    let sink = Arc::new(TelegramSink::new(bot.clone()));
    let identity = BotIdentity::new();
    let processor = Arc::new(TurnProcessor::new(
        store,
        generator,
        sink,
        identity.clone(),
    ));

    info!("bot started");

    run_repl(bot, processor, identity, config.admin_id).await
}
