//! This is the library of the opsbot GitHub bot.
pub mod bot;
pub mod config;
pub mod github;
pub mod utils;

pub use bot::handlers::{dispatch, ActionResult, HandledOutcome};
pub use config::BotConfig;
pub use github::api::GithubApiClient;
pub use github::server::{create_app, ServerState};

#[cfg(test)]
mod tests;
