use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;
use url::Url;

use opsbot::config::DEFAULT_BIND_ADDR;
use opsbot::{create_app, BotConfig, GithubApiClient, ServerState};

#[derive(clap::Parser)]
struct Opts {
    /// Token used to authenticate against the GitHub API.
    #[arg(long, env = "BOT_TOKEN")]
    token: String,

    /// Secret used to authenticate webhooks.
    /// Webhook signatures are not checked when it is missing.
    #[arg(long, env = "WEBHOOK_SECRET")]
    webhook_secret: Option<String>,

    /// Address on which the webhook server listens.
    #[arg(long, env = "BIND_ADDR", default_value = DEFAULT_BIND_ADDR)]
    bind_addr: SocketAddr,

    /// Base URL of the GitHub API (for GitHub Enterprise).
    #[arg(long, env = "GITHUB_API_URL")]
    github_api_url: Option<Url>,
}

async fn server(config: BotConfig) -> anyhow::Result<()> {
    let client = GithubApiClient::new(&config)?;
    let BotConfig {
        webhook_secret,
        bind_addr,
        ..
    } = config;
    if webhook_secret.is_none() {
        tracing::warn!("No webhook secret configured, webhook signatures will not be verified");
    }

    let app = create_app(ServerState::new(Arc::new(client), webhook_secret));
    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Cannot bind to {bind_addr}"))?;
    tracing::info!("Listening on {bind_addr}");

    axum::serve(listener, app).await?;
    Ok(())
}

fn try_main(opts: Opts) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Cannot build tokio runtime")?;

    let config = BotConfig::new(opts.token, opts.bind_addr)
        .webhook_secret(opts.webhook_secret)
        .api_url(opts.github_api_url);

    runtime.block_on(async move {
        let res = server(config).await;
        tracing::warn!("Server has ended: {res:?}");
        res
    })
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let opts = Opts::parse();
    if let Err(error) = try_main(opts) {
        eprintln!("Error: {error:?}");
        std::process::exit(1);
    }
}
