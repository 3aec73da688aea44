//! REPL runner: converts teloxide messages to core events and hands them to
//! the [`TurnProcessor`]. Spawns best-effort `getMe` identity resolution
//! before starting.

use std::sync::Arc;

use teloxide::prelude::*;
use tracing::{error, info, instrument};

use crate::identity::BotIdentity;
use crate::processor::TurnProcessor;

use super::commands::{handle_command, is_command};
use super::event::TelegramMessageWrapper;

/// Starts the message loop. Each text message is converted to a core event
/// and processed in a spawned task so the loop keeps accepting updates while
/// a turn awaits the backend. Stops on SIGINT/SIGTERM (teloxide's ctrl-c
/// handling); in-flight turns are not drained.
#[instrument(skip(bot, processor, identity))]
pub async fn run_repl(
    bot: teloxide::Bot,
    processor: Arc<TurnProcessor>,
    identity: BotIdentity,
    admin_id: Option<i64>,
) -> anyhow::Result<()> {
    spawn_identity_resolution(bot.clone(), identity);

    teloxide::repl(bot, move |bot: Bot, msg: teloxide::types::Message| {
        let processor = processor.clone();

        async move {
            let Some(text) = msg.text() else {
                info!(chat_id = msg.chat.id.0, "skipping non-text message");
                return Ok(());
            };

            if is_command(text) {
                return handle_command(&bot, &msg, text, admin_id).await;
            }

            let Some(event) = TelegramMessageWrapper(&msg).to_incoming() else {
                return Ok(());
            };

            // Run the turn in a spawned task so the loop returns immediately;
            // the processor folds every failure into the outcome, so nothing
            // here can stop later turns.
            tokio::spawn(async move {
                processor.process(event).await;
            });

            Ok(())
        }
    })
    .await;

    Ok(())
}

/// Resolves the bot's display name via `getMe` without blocking startup.
/// Until it completes, turns use the placeholder identity.
fn spawn_identity_resolution(bot: teloxide::Bot, identity: BotIdentity) {
    tokio::spawn(async move {
        match bot.get_me().await {
            Ok(me) => {
                let name = me
                    .user
                    .username
                    .clone()
                    .unwrap_or_else(|| format!("Bot_{}", me.user.id.0));
                info!(username = %name, bot_id = me.user.id.0, "bot info fetched");
                identity.resolve(name).await;
            }
            Err(e) => {
                error!(error = %e, "failed to fetch bot info; using placeholder identity");
            }
        }
    });
}
