//! Bot configuration, loaded once at startup from environment variables.
//!
//! Required: `TELEGRAM_BOT_TOKEN` (or `BOT_TOKEN`) and `BACKEND_API_URL`;
//! both are fatal if absent. Everything else has a default.

use anyhow::Result;
use std::env;

/// Relay bot config: Telegram credential, backend endpoint, context bound, logging.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// TELEGRAM_BOT_TOKEN or BOT_TOKEN
    pub bot_token: String,
    /// BACKEND_API_URL: reply-generation endpoint (POST)
    pub backend_url: String,
    /// ADMIN_TELEGRAM_ID: gates /start and /admincheck; admin commands disabled when unset
    pub admin_id: Option<i64>,
    /// MAX_CONTEXT_MESSAGES: per-chat rolling window bound
    pub max_context: usize,
    /// BACKEND_TIMEOUT_SECS: generation call timeout
    pub backend_timeout_secs: u64,
    /// Log file path
    pub log_file: String,
}

/// Default per-chat context bound when `MAX_CONTEXT_MESSAGES` is unset.
pub const DEFAULT_MAX_CONTEXT: usize = 10;

/// Default generation call timeout. Long because the backend may sit on a slow model.
pub const DEFAULT_BACKEND_TIMEOUT_SECS: u64 = 30;

impl BotConfig {
    /// Load from environment variables. `token` overrides the env token if provided.
    /// Call [`validate`](Self::validate) after load to fail fast before init.
    pub fn load(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("TELEGRAM_BOT_TOKEN")
                .or_else(|_| env::var("BOT_TOKEN"))
                .map_err(|_| anyhow::anyhow!("TELEGRAM_BOT_TOKEN not set"))?,
        };
        let backend_url = env::var("BACKEND_API_URL")
            .map_err(|_| anyhow::anyhow!("BACKEND_API_URL not set"))?;
        let admin_id = env::var("ADMIN_TELEGRAM_ID")
            .ok()
            .and_then(|s| s.parse().ok());
        let max_context = env::var("MAX_CONTEXT_MESSAGES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_MAX_CONTEXT);
        let backend_timeout_secs = env::var("BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_BACKEND_TIMEOUT_SECS);
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/relay-bot.log".to_string());

        Ok(Self {
            bot_token,
            backend_url,
            admin_id,
            max_context,
            backend_timeout_secs,
            log_file,
        })
    }

    /// Validate config (e.g. backend_url must be a valid URL).
    pub fn validate(&self) -> Result<()> {
        if reqwest::Url::parse(&self.backend_url).is_err() {
            anyhow::bail!("BACKEND_API_URL is not a valid URL: {}", self.backend_url);
        }
        if self.max_context == 0 {
            anyhow::bail!("MAX_CONTEXT_MESSAGES must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in [
            "TELEGRAM_BOT_TOKEN",
            "BOT_TOKEN",
            "BACKEND_API_URL",
            "ADMIN_TELEGRAM_ID",
            "MAX_CONTEXT_MESSAGES",
            "BACKEND_TIMEOUT_SECS",
            "LOG_FILE",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn load_fails_without_token() {
        clear_env();
        env::set_var("BACKEND_API_URL", "http://localhost:8000/reply");
        assert!(BotConfig::load(None).is_err());
    }

    #[test]
    #[serial]
    fn load_fails_without_backend_url() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token123");
        assert!(BotConfig::load(None).is_err());
    }

    #[test]
    #[serial]
    fn load_applies_defaults() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token123");
        env::set_var("BACKEND_API_URL", "http://localhost:8000/reply");

        let config = BotConfig::load(None).unwrap();
        assert_eq!(config.bot_token, "token123");
        assert_eq!(config.max_context, DEFAULT_MAX_CONTEXT);
        assert_eq!(config.backend_timeout_secs, DEFAULT_BACKEND_TIMEOUT_SECS);
        assert_eq!(config.log_file, "logs/relay-bot.log");
        assert!(config.admin_id.is_none());
    }

    #[test]
    #[serial]
    fn load_reads_optional_vars() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token123");
        env::set_var("BACKEND_API_URL", "http://localhost:8000/reply");
        env::set_var("ADMIN_TELEGRAM_ID", "555");
        env::set_var("MAX_CONTEXT_MESSAGES", "3");

        let config = BotConfig::load(None).unwrap();
        assert_eq!(config.admin_id, Some(555));
        assert_eq!(config.max_context, 3);
    }

    #[test]
    #[serial]
    fn explicit_token_overrides_env() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "from_env");
        env::set_var("BACKEND_API_URL", "http://localhost:8000/reply");

        let config = BotConfig::load(Some("from_cli".to_string())).unwrap();
        assert_eq!(config.bot_token, "from_cli");
    }

    #[test]
    #[serial]
    fn validate_rejects_bad_url() {
        clear_env();
        env::set_var("TELEGRAM_BOT_TOKEN", "token123");
        env::set_var("BACKEND_API_URL", "not a url");

        let config = BotConfig::load(None).unwrap();
        assert!(config.validate().is_err());
    }
}
