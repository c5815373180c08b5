// TestDependencies - mock implementations for testing
//
// Provides mock services that can be injected into ServerDeps for tests.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use line::{LineOptions, LineService, WebhookPayload};
use sha2::Sha256;

use super::BaseMessenger;

// =============================================================================
// Test Messenger
// =============================================================================

/// A reply captured by [`TestMessenger`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReply {
    pub reply_token: String,
    pub text: String,
}

/// Messenger that verifies signatures for real and records replies instead of
/// sending them.
#[derive(Clone)]
pub struct TestMessenger {
    secret: String,
    verifier: Arc<LineService>,
    replies: Arc<Mutex<Vec<SentReply>>>,
    fail_replies: bool,
}

impl TestMessenger {
    pub fn new(channel_secret: &str) -> Self {
        let verifier = LineService::new(LineOptions {
            channel_access_token: String::new(),
            channel_secret: channel_secret.to_string(),
        });
        Self {
            secret: channel_secret.to_string(),
            verifier: Arc::new(verifier),
            replies: Arc::new(Mutex::new(Vec::new())),
            fail_replies: false,
        }
    }

    /// Make every reply call fail, as an unreachable platform would.
    pub fn failing_replies(mut self) -> Self {
        self.fail_replies = true;
        self
    }

    /// Signature the platform would send for `body`.
    pub fn sign(&self, body: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    pub fn replies(&self) -> Vec<SentReply> {
        self.replies.lock().unwrap().clone()
    }
}

#[async_trait]
impl BaseMessenger for TestMessenger {
    fn parse_webhook(&self, body: &[u8], signature: &str) -> line::Result<WebhookPayload> {
        self.verifier.parse_webhook(body, signature)
    }

    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()> {
        if self.fail_replies {
            anyhow::bail!("reply endpoint unavailable");
        }
        self.replies.lock().unwrap().push(SentReply {
            reply_token: reply_token.to_string(),
            text: text.to_string(),
        });
        Ok(())
    }
}
