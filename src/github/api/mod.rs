use anyhow::Context;
use octocrab::Octocrab;
use secrecy::ExposeSecret;

use crate::config::BotConfig;

pub mod client;

pub use client::GithubApiClient;

/// Creates an octocrab client authenticated with the personal token of the bot.
pub fn create_github_client(config: &BotConfig) -> anyhow::Result<Octocrab> {
    let mut builder = Octocrab::builder().personal_token(config.token.expose_secret().clone());
    if let Some(api_url) = &config.api_url {
        builder = builder
            .base_uri(api_url.as_str())
            .with_context(|| format!("Invalid GitHub API URL {api_url}"))?;
    }
    builder.build().context("Could not create octocrab client")
}
