//! Server dependencies for the bot.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use line::{LineService, WebhookPayload};

use super::BaseMessenger;
use crate::domains::exhibitions::ExhibitionIndex;

// =============================================================================
// LineAdapter
// =============================================================================

/// Wrapper around LineService that implements BaseMessenger trait
pub struct LineAdapter(pub Arc<LineService>);

impl LineAdapter {
    pub fn new(service: Arc<LineService>) -> Self {
        Self(service)
    }
}

#[async_trait]
impl BaseMessenger for LineAdapter {
    fn parse_webhook(&self, body: &[u8], signature: &str) -> line::Result<WebhookPayload> {
        self.0.parse_webhook(body, signature)
    }

    async fn reply_text(&self, reply_token: &str, text: &str) -> Result<()> {
        self.0
            .reply_text(reply_token, text)
            .await
            .map_err(|e| anyhow::anyhow!("{}", e))
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub messenger: Arc<dyn BaseMessenger>,
    pub exhibitions: Arc<ExhibitionIndex>,
    pub search_limit: usize,
}

impl ServerDeps {
    pub fn new(
        messenger: Arc<dyn BaseMessenger>,
        exhibitions: Arc<ExhibitionIndex>,
        search_limit: usize,
    ) -> Self {
        Self {
            messenger,
            exhibitions,
            search_limit,
        }
    }
}
