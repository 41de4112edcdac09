use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sha2::Sha256;

use crate::bot::event::{
    InboundEvent, IssueCommentEvent, OtherEvent, PullRequestEvent, PushEvent, WatchEvent,
};
use crate::github::server::ServerStateRef;
use crate::github::{GithubRepoName, PullRequestNumber};

/// Maximum accepted size of a webhook body (GitHub caps payloads at 25 MB).
const MAX_WEBHOOK_BODY_SIZE: usize = 25 * 1024 * 1024;

#[derive(thiserror::Error, Debug)]
pub enum WebhookParseError {
    #[error("x-github-event header not found")]
    MissingEventType,
    #[error("Malformed {event_type} payload")]
    MalformedPayload {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Deserialize, Debug)]
struct WebhookRepository {
    name: String,
    owner: WebhookUser,
}

#[derive(Deserialize, Debug)]
struct WebhookUser {
    login: String,
}

#[derive(Deserialize, Debug)]
struct WebhookPush {
    #[serde(rename = "ref")]
    git_ref: String,
    repository: WebhookRepository,
    sender: WebhookUser,
}

#[derive(Deserialize, Debug)]
struct WebhookPullRequestInner {
    number: u64,
}

#[derive(Deserialize, Debug)]
struct WebhookPullRequest {
    action: String,
    pull_request: WebhookPullRequestInner,
    repository: WebhookRepository,
    sender: WebhookUser,
}

#[derive(Deserialize, Debug)]
struct WebhookWatch {
    action: String,
    repository: WebhookRepository,
    sender: WebhookUser,
}

#[derive(Deserialize, Debug)]
struct WebhookIssue {
    number: u64,
    #[serde(default)]
    pull_request: Option<serde_json::Value>,
}

#[derive(Deserialize, Debug)]
struct WebhookComment {
    #[serde(default)]
    body: Option<String>,
}

#[derive(Deserialize, Debug)]
struct WebhookIssueComment {
    action: String,
    issue: WebhookIssue,
    comment: WebhookComment,
    repository: WebhookRepository,
    sender: WebhookUser,
}

/// Fields that are present in most webhooks, used for events that the bot does not know.
#[derive(Deserialize, Debug)]
struct WebhookOther {
    #[serde(default)]
    repository: Option<WebhookRepository>,
    #[serde(default)]
    sender: Option<WebhookUser>,
}

impl From<WebhookRepository> for GithubRepoName {
    fn from(repository: WebhookRepository) -> Self {
        GithubRepoName::new(&repository.owner.login, &repository.name)
    }
}

/// Parses the body of a webhook delivery, based on the value of its `X-GitHub-Event` header.
pub fn parse_webhook(
    body: &[u8],
    event_type: Option<&str>,
) -> Result<InboundEvent, WebhookParseError> {
    let Some(event_type) = event_type else {
        return Err(WebhookParseError::MissingEventType);
    };
    let malformed = |source| WebhookParseError::MalformedPayload {
        event_type: event_type.to_string(),
        source,
    };

    let event = match event_type {
        "push" => {
            let payload: WebhookPush = serde_json::from_slice(body).map_err(malformed)?;
            InboundEvent::Push(PushEvent {
                repository: payload.repository.into(),
                sender: payload.sender.login,
                git_ref: payload.git_ref,
            })
        }
        "pull_request" => {
            let payload: WebhookPullRequest = serde_json::from_slice(body).map_err(malformed)?;
            InboundEvent::PullRequest(PullRequestEvent {
                repository: payload.repository.into(),
                sender: payload.sender.login,
                action: payload.action,
                pr_number: PullRequestNumber(payload.pull_request.number),
            })
        }
        "watch" => {
            let payload: WebhookWatch = serde_json::from_slice(body).map_err(malformed)?;
            InboundEvent::Watch(WatchEvent {
                repository: payload.repository.into(),
                sender: payload.sender.login,
                action: payload.action,
            })
        }
        "issue_comment" => {
            let payload: WebhookIssueComment = serde_json::from_slice(body).map_err(malformed)?;
            InboundEvent::IssueComment(IssueCommentEvent {
                repository: payload.repository.into(),
                sender: payload.sender.login,
                action: payload.action,
                issue_number: PullRequestNumber(payload.issue.number),
                is_pull_request: payload.issue.pull_request.is_some(),
                text: payload.comment.body.unwrap_or_default(),
            })
        }
        _ => {
            let payload: WebhookOther = serde_json::from_slice(body).map_err(malformed)?;
            InboundEvent::Other(OtherEvent {
                event_type: event_type.to_string(),
                repository: payload.repository.map(GithubRepoName::from),
                sender: payload.sender.map(|sender| sender.login),
            })
        }
    };
    Ok(event)
}

/// A raw webhook delivery, which has been authenticated but not parsed yet.
#[derive(Debug)]
pub struct WebhookDelivery {
    pub event_type: Option<String>,
    pub body: Bytes,
}

/// axum extractor for GitHub webhook deliveries.
#[derive(Debug)]
pub struct GitHubWebhook(pub WebhookDelivery);

/// Extracts a webhook delivery from a HTTP request.
#[async_trait]
impl FromRequest<ServerStateRef> for GitHubWebhook {
    type Rejection = StatusCode;

    async fn from_request(
        request: Request,
        state: &ServerStateRef,
    ) -> Result<Self, Self::Rejection> {
        let (parts, body) = request.into_parts();

        // Eagerly load body
        let body: Bytes = axum::body::to_bytes(body, MAX_WEBHOOK_BODY_SIZE)
            .await
            .map_err(|error| {
                tracing::error!("Parsing webhook body failed: {error:?}");
                StatusCode::BAD_REQUEST
            })?;

        // Verify that the request is valid
        if let Some(secret) = state.get_webhook_secret() {
            if !verify_gh_signature(&parts.headers, &body, secret) {
                tracing::error!("Webhook request failed, could not authenticate webhook");
                return Err(StatusCode::BAD_REQUEST);
            }
        }

        let event_type = parts
            .headers
            .get("x-github-event")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Ok(GitHubWebhook(WebhookDelivery { event_type, body }))
    }
}

type HmacSha256 = Hmac<Sha256>;

/// Verifies that the request is properly signed by GitHub with SHA-256 and the passed `secret`.
fn verify_gh_signature(
    headers: &HeaderMap<HeaderValue>,
    body: &[u8],
    secret: &WebhookSecret,
) -> bool {
    let Some(signature) = headers.get("x-hub-signature-256").map(|v| v.as_bytes()) else {
        return false;
    };
    let Some(signature) = signature
        .strip_prefix(b"sha256=")
        .and_then(|v| hex::decode(v).ok())
    else {
        return false;
    };

    // HMAC accepts keys of any size
    let Ok(mut mac) = HmacSha256::new_from_slice(secret.expose().as_bytes()) else {
        return false;
    };
    mac.update(body);
    mac.verify_slice(&signature).is_ok()
}

/// Wrapper for a secret which is zeroed on drop and can be exposed only through the
/// [`WebhookSecret::expose`] method.
pub struct WebhookSecret(SecretString);

impl WebhookSecret {
    pub fn new(secret: String) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        self.0.expose_secret().as_str()
    }
}
