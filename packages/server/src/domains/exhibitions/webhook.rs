//! LINE webhook handler.
//!
//! Verifies the delivery signature against the raw body, then answers every
//! text message with the exhibitions matching it. Reply failures are logged
//! and do not change the response, so the platform does not redeliver.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use line::{LineError, SIGNATURE_HEADER};

use super::format_reply;
use crate::kernel::ServerDeps;

/// State shared with the webhook handler.
#[derive(Clone)]
pub struct WebhookState {
    pub deps: Arc<ServerDeps>,
}

/// Build the axum router for the webhook endpoint.
pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/callback", post(handle_callback))
        .with_state(state)
}

async fn handle_callback(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(signature) = headers
        .get(SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
    else {
        tracing::warn!("Webhook delivery without signature");
        return (StatusCode::BAD_REQUEST, "Missing signature");
    };

    let payload = match state.deps.messenger.parse_webhook(&body, signature) {
        Ok(payload) => payload,
        Err(LineError::InvalidSignature) => {
            tracing::warn!(bytes = body.len(), "Webhook signature mismatch");
            return (StatusCode::BAD_REQUEST, "Invalid signature");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Malformed webhook payload");
            return (StatusCode::BAD_REQUEST, "Malformed payload");
        }
    };

    for (reply_token, text) in payload.events.iter().filter_map(|event| event.as_text()) {
        if let Err(e) = answer(&state.deps, reply_token, text).await {
            tracing::error!(reply_token, query = %text, error = %e, "Failed to send reply");
        }
    }

    (StatusCode::OK, "OK")
}

/// Search for `text` and send the formatted result.
async fn answer(deps: &ServerDeps, reply_token: &str, text: &str) -> anyhow::Result<()> {
    let matches = deps.exhibitions.search(text, deps.search_limit);
    tracing::info!(query = %text.trim(), matches = matches.len(), "Answering search");

    let reply = format_reply(&matches, deps.exhibitions.site_info());
    deps.messenger.reply_text(reply_token, &reply).await
}
