//! Mattermost incoming-webhook notifications.

use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

use crate::config::NotifyConfig;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("no Mattermost webhook URL configured")]
    MissingWebhook,
    #[error("webhook request failed: {0}")]
    Curl(#[from] curl::Error),
    #[error("failed to send message: HTTP {0}")]
    Status(u32),
    #[error("failed to encode message: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Body of an incoming-webhook post.
#[derive(Debug, Serialize)]
pub struct WebhookMessage<'a> {
    pub text: &'a str,
}

/// POST `{"text": text}` to `webhook_url`. Any non-2xx reply is an error.
pub fn send_mattermost(
    webhook_url: &str,
    text: &str,
    timeout: Duration,
) -> Result<(), NotifyError> {
    let body = serde_json::to_vec(&WebhookMessage { text })?;

    let mut easy = curl::easy::Easy::new();
    easy.url(webhook_url)?;
    easy.post(true)?;
    easy.post_fields_copy(&body)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout)?;

    let mut list = curl::easy::List::new();
    list.append("Content-Type: application/json")?;
    easy.http_headers(list)?;

    {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(NotifyError::Status(code));
    }
    Ok(())
}

/// Send `text` through the configured webhook. Problems are logged, not returned.
/// Returns whether the message was delivered.
pub fn notify(cfg: &NotifyConfig, text: &str, timeout: Duration) -> bool {
    let result = match cfg.mattermost_webhook_url.as_deref().filter(|u| !u.trim().is_empty()) {
        Some(url) => send_mattermost(url, text, timeout),
        None => Err(NotifyError::MissingWebhook),
    };
    match result {
        Ok(()) => {
            tracing::info!("notification sent");
            true
        }
        Err(e) => {
            tracing::error!("error sending message to Mattermost: {}", e);
            false
        }
    }
}
