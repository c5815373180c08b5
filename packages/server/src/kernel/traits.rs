// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
//
// Naming convention: Base* for trait names (e.g., BaseMessenger)

use anyhow::Result;
use async_trait::async_trait;
use line::WebhookPayload;

// =============================================================================
// Messenger Trait (Infrastructure - chat platform)
// =============================================================================

#[async_trait]
pub trait BaseMessenger: Send + Sync {
    /// Verify a webhook delivery's signature against its raw body, then parse
    /// it. Fails with `LineError::InvalidSignature` or `LineError::Payload`.
    fn parse_webhook(&self, body: &[u8], signature: &str) -> line::Result<WebhookPayload>;

    /// Answer an inbound event with a single text message
    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()>;
}
