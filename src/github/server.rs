use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;

use crate::bot::{dispatch, GithubClient};
use crate::github::webhook::{GitHubWebhook, WebhookSecret};

/// Shared server state for all axum handlers.
pub struct ServerState {
    client: Arc<dyn GithubClient>,
    webhook_secret: Option<WebhookSecret>,
}

impl ServerState {
    /// Webhook signatures are only verified when `webhook_secret` is set.
    pub fn new(client: Arc<dyn GithubClient>, webhook_secret: Option<WebhookSecret>) -> Self {
        Self {
            client,
            webhook_secret,
        }
    }

    pub fn get_webhook_secret(&self) -> Option<&WebhookSecret> {
        self.webhook_secret.as_ref()
    }
}

pub type ServerStateRef = Arc<ServerState>;

pub fn create_app(state: ServerState) -> Router {
    Router::new()
        .route("/github", post(github_webhook_handler))
        .route("/health", get(health_handler))
        .layer(ConcurrencyLimitLayer::new(100))
        .with_state(Arc::new(state))
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "")
}

/// Axum handler that receives a webhook and reacts to it before acknowledging it.
///
/// The delivery is always acknowledged, even if it could not be handled, so that GitHub
/// does not redeliver it.
pub async fn github_webhook_handler(
    State(state): State<ServerStateRef>,
    GitHubWebhook(delivery): GitHubWebhook,
) -> impl IntoResponse {
    let outcome = dispatch(
        state.client.as_ref(),
        &delivery.body,
        delivery.event_type.as_deref(),
    )
    .await;
    tracing::debug!("Webhook handled: {outcome:?}");
    (StatusCode::OK, "ok")
}
