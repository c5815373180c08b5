//! Minimal LINE Messaging API client.
//!
//! Covers what a reply-only bot needs: checking the `X-Line-Signature`
//! header of a webhook delivery, parsing the payload, and answering through
//! the reply endpoint.
//!
//! # Example
//!
//! ```rust,ignore
//! use line::{LineOptions, LineService};
//!
//! let line = LineService::new(LineOptions {
//!     channel_access_token: "token".into(),
//!     channel_secret: "secret".into(),
//! });
//!
//! let payload = line.parse_webhook(&body, &signature)?;
//! for (reply_token, text) in payload.events.iter().filter_map(|e| e.as_text()) {
//!     line.reply_text(reply_token, text).await?;
//! }
//! ```

pub mod error;
pub mod models;

pub use error::{LineError, Result};
pub use models::{Event, Message, ReplyRequest, SendMessage, WebhookPayload};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;

const API_BASE: &str = "https://api.line.me";

/// Header carrying the webhook signature.
pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Longest text a single message may carry.
pub const MAX_TEXT_CHARS: usize = 5000;

#[derive(Debug, Clone)]
pub struct LineOptions {
    pub channel_access_token: String,
    pub channel_secret: String,
}

#[derive(Debug, Clone)]
pub struct LineService {
    options: LineOptions,
    client: reqwest::Client,
    api_base: String,
}

impl LineService {
    pub fn new(options: LineOptions) -> Self {
        Self {
            options,
            client: reqwest::Client::new(),
            api_base: API_BASE.to_string(),
        }
    }

    /// Send API calls somewhere other than api.line.me.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    /// Check `signature` (base64 HMAC-SHA256 of `body` keyed by the channel
    /// secret). Comparison is constant-time.
    pub fn verify_signature(&self, body: &[u8], signature: &str) -> bool {
        let Ok(expected) = STANDARD.decode(signature.trim()) else {
            return false;
        };
        let Ok(mut mac) = Hmac::<Sha256>::new_from_slice(self.options.channel_secret.as_bytes())
        else {
            return false;
        };
        mac.update(body);
        mac.verify_slice(&expected).is_ok()
    }

    /// Verify and parse a webhook delivery.
    pub fn parse_webhook(&self, body: &[u8], signature: &str) -> Result<WebhookPayload> {
        if !self.verify_signature(body, signature) {
            return Err(LineError::InvalidSignature);
        }
        Ok(serde_json::from_slice(body)?)
    }

    /// Answer an event with a single text message.
    pub async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()> {
        let request = ReplyRequest {
            reply_token,
            messages: vec![SendMessage::Text {
                text: text.to_string(),
            }],
        };

        let url = format!("{}/v2/bot/message/reply", self.api_base);
        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.options.channel_access_token)
            .json(&request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LineError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        tracing::debug!(reply_token, chars = text.chars().count(), "Reply sent");
        Ok(())
    }
}
