//! Command handling: `/start` and `/admincheck`. Commands never reach the
//! turn processor and never touch chat context.

use teloxide::prelude::*;
use tracing::{debug, info};

const START_GREETING: &str = "Hi! I'm a chat-member bot. Add me to a group and I'll try to be \
an interesting conversation partner.\nRemember to disable privacy mode for me in the group \
settings or via @BotFather so I can see all messages.";

const ADMIN_ONLY: &str = "This command is only available to the bot administrator.";

/// Whether `text` should be handled as a command rather than a turn.
pub fn is_command(text: &str) -> bool {
    text.starts_with('/')
}

/// Command name without the leading slash or a trailing `@botname` suffix.
fn command_name(text: &str) -> &str {
    let token = text.split_whitespace().next().unwrap_or(text);
    let token = token.trim_start_matches('/');
    token.split('@').next().unwrap_or(token)
}

/// Dispatches a command message. Unknown commands are ignored.
pub async fn handle_command(
    bot: &teloxide::Bot,
    msg: &teloxide::types::Message,
    text: &str,
    admin_id: Option<i64>,
) -> ResponseResult<()> {
    let sender_id = msg.from.as_ref().map(|u| u.id.0 as i64);
    let is_admin = matches!((sender_id, admin_id), (Some(s), Some(a)) if s == a);

    match command_name(text) {
        "start" => {
            if is_admin {
                bot.send_message(msg.chat.id, START_GREETING).await?;
            }
        }
        "admincheck" => {
            if is_admin {
                let reply = format!(
                    "Hello, admin! Your ID: {}",
                    sender_id.unwrap_or_default()
                );
                bot.send_message(msg.chat.id, reply).await?;
            } else {
                bot.send_message(msg.chat.id, ADMIN_ONLY).await?;
                info!(user_id = ?sender_id, "attempted admin command access");
            }
        }
        other => {
            debug!(command = %other, "ignoring unknown command");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_commands() {
        assert!(is_command("/start"));
        assert!(is_command("/admincheck@relaybot"));
        assert!(!is_command("hello /start"));
    }

    #[test]
    fn strips_slash_and_mention() {
        assert_eq!(command_name("/start"), "start");
        assert_eq!(command_name("/admincheck@relaybot"), "admincheck");
        assert_eq!(command_name("/start now"), "start");
    }
}
