//! A minimal Telegram Bot API client, used as the one-way sink for operational
//! notification messages. Nothing in the application ever reads from Telegram;
//! a lost message only costs visibility.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use nextarr_common::environment::{
    get_env_var,
    variables::{TELEGRAM_BOT_TOKEN, TELEGRAM_CHAT_ID},
};
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Settings to configure a [TelegramClient].
pub struct TelegramClientSettings {
    pub bot_token: String,
    pub chat_id: String,
}

/// A one-way sink for human-readable notification lines.
#[async_trait]
pub trait NotificationClient {
    async fn send_message(&self, text: &str) -> Result<()>;
}

#[derive(Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// A Telegram client for Nextarr.
#[derive(Clone)]
pub struct TelegramClient {
    http: Client,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(settings: TelegramClientSettings) -> Self {
        TelegramClient {
            http: Client::new(),
            bot_token: settings.bot_token,
            chat_id: settings.chat_id,
        }
    }
}

#[async_trait]
impl NotificationClient for TelegramClient {
    async fn send_message(&self, text: &str) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE, self.bot_token);
        let request = SendMessageRequest {
            chat_id: &self.chat_id,
            text,
        };
        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .context("Failed to deliver the message to the Telegram Bot API.")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Telegram returned {}: {}", status, body);
        }
        debug!("Delivered notification message to Telegram.");
        Ok(())
    }
}

/// Build a [TelegramClient] from the environment.
pub fn initialize_telegram_client() -> Result<TelegramClient> {
    let bot_token = get_env_var(TELEGRAM_BOT_TOKEN)
        .context("Could not retrieve the Telegram bot token from the environment.")?;
    let chat_id = get_env_var(TELEGRAM_CHAT_ID)
        .context("Could not retrieve the Telegram chat ID from the environment.")?;
    Ok(TelegramClient::new(TelegramClientSettings {
        bot_token,
        chat_id,
    }))
}
