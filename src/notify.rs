use anyhow::Result;
use reqwest::Client;
use serde_json::json;
use tracing::info;

/// Delivers a text message to a chat recipient. Without a bot token the
/// message is logged instead, which keeps `check --notify` usable in dev.
pub enum Notifier {
    Log,
    Telegram { token: String },
}

impl Notifier {
    pub fn from_env() -> Self {
        match std::env::var("TELEGRAM_BOT_TOKEN") {
            Ok(token) if !token.is_empty() => Self::Telegram { token },
            _ => Self::Log,
        }
    }

    pub async fn send(&self, client: &Client, chat_id: &str, text: &str) -> Result<()> {
        match self {
            Self::Log => {
                info!("📣 [{}] {}", chat_id, text);
                Ok(())
            }
            Self::Telegram { token } => {
                let url = format!("https://api.telegram.org/bot{token}/sendMessage");
                client
                    .post(&url)
                    .json(&json!({ "chat_id": chat_id, "text": text }))
                    .send()
                    .await?
                    .error_for_status()?;
                Ok(())
            }
        }
    }
}
