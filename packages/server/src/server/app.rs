//! Application setup and server configuration.

use std::sync::Arc;

use axum::{extract::Extension, routing::get, Router};
use line::{LineOptions, LineService};
use tower_http::trace::TraceLayer;

use crate::domains::exhibitions::webhook::{self, WebhookState};
use crate::domains::exhibitions::ExhibitionIndex;
use crate::kernel::{LineAdapter, ServerDeps};
use crate::server::routes::health_handler;
use crate::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Wire the real LINE client and the loaded dataset into server dependencies.
pub fn build_deps(config: &Config, exhibitions: ExhibitionIndex) -> ServerDeps {
    let line = LineService::new(LineOptions {
        channel_access_token: config.line_channel_access_token.clone(),
        channel_secret: config.line_channel_secret.clone(),
    });

    ServerDeps::new(
        Arc::new(LineAdapter::new(Arc::new(line))),
        Arc::new(exhibitions),
        config.search_limit,
    )
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps) -> Router {
    let deps = Arc::new(deps);
    let app_state = AppState { deps: deps.clone() };

    Router::new()
        .route("/health", get(health_handler))
        .merge(webhook::router(WebhookState { deps }))
        .layer(Extension(app_state))
        .layer(TraceLayer::new_for_http())
}
