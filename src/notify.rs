// src/notify.rs
//! Telegram notifications summarizing a sync run.

use crate::api::parser::preview;
use crate::constants::TELEGRAM_API_BASE_URL;
use crate::error::AppError;
use crate::types::SecretKey;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// The ability to deliver a short text message.
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str) -> Result<(), AppError>;
}

/// Sends messages to one chat through the Telegram Bot API.
#[derive(Clone)]
pub struct TelegramNotifier {
    client: Client,
    endpoint: String,
    chat_id: String,
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

impl TelegramNotifier {
    pub fn new(
        token: &SecretKey,
        chat_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            endpoint: format!("{}/bot{}/sendMessage", TELEGRAM_API_BASE_URL, token.as_str()),
            chat_id: chat_id.into(),
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, text: &str) -> Result<(), AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&SendMessage {
                chat_id: &self.chat_id,
                text,
            })
            .send()
            .await
            // The request URL embeds the bot token.
            .map_err(|e| AppError::Transport(e.without_url()))?;

        let status = response.status();
        if status.is_success() {
            log::info!("Telegram notification sent");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(AppError::Notification(format!(
                "Telegram answered HTTP {}: {}",
                status,
                preview(&body)
            )))
        }
    }
}
