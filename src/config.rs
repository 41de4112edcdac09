use std::net::SocketAddr;

use secrecy::SecretString;
use url::Url;

use crate::github::WebhookSecret;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Process-wide configuration of the bot.
/// It is created once on startup and only read afterwards.
pub struct BotConfig {
    /// Token used to authenticate against the GitHub API.
    pub token: SecretString,
    /// When set, webhooks without a valid signature are rejected.
    pub webhook_secret: Option<WebhookSecret>,
    pub bind_addr: SocketAddr,
    /// Base URL of the GitHub API, for GitHub Enterprise installations.
    pub api_url: Option<Url>,
}

impl BotConfig {
    pub fn new(token: String, bind_addr: SocketAddr) -> Self {
        Self {
            token: token.into(),
            webhook_secret: None,
            bind_addr,
            api_url: None,
        }
    }

    pub fn webhook_secret(mut self, secret: Option<String>) -> Self {
        // An empty secret is treated as if no secret was configured
        self.webhook_secret = secret
            .filter(|secret| !secret.is_empty())
            .map(WebhookSecret::new);
        self
    }

    pub fn api_url(mut self, api_url: Option<Url>) -> Self {
        self.api_url = api_url;
        self
    }
}
