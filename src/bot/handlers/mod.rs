use tracing::Instrument;

use crate::bot::command::{parse_commands, BotCommand};
use crate::bot::event::{InboundEvent, IssueCommentEvent, PullRequestEvent, WatchEvent};
use crate::bot::handlers::labels::{add_label, remove_label};
use crate::bot::handlers::merge::merge_if_approved;
use crate::bot::handlers::review::request_reviewers;
use crate::bot::{Comment, GithubClient};
use crate::github::{parse_webhook, GithubRepoName, PullRequestNumber};
use crate::utils::logging::LogError;

mod labels;
mod merge;
mod review;

/// Outcome of a single action performed on GitHub.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionResult {
    pub succeeded: bool,
    pub message: String,
}

impl ActionResult {
    pub fn success(message: String) -> Self {
        Self {
            succeeded: true,
            message,
        }
    }

    pub fn failure(message: String) -> Self {
        Self {
            succeeded: false,
            message,
        }
    }
}

/// What the bot did with a webhook delivery.
#[derive(Debug, PartialEq)]
pub enum HandledOutcome {
    /// The payload could not be parsed.
    Malformed,
    /// The event is known, but there is nothing to do for it.
    Ignored,
    /// Someone starred the repository. Only logged.
    Starred,
    /// The event type is not known to the bot.
    UnknownEvent(String),
    /// Actions were performed, in this order.
    Executed(Vec<ActionResult>),
}

/// Parses a raw webhook delivery and reacts to it.
///
/// Never fails: parse errors and failed actions are logged (and for merges posted as a
/// comment), because GitHub would redeliver any webhook that is not acknowledged.
pub async fn dispatch(
    client: &dyn GithubClient,
    body: &[u8],
    event_type: Option<&str>,
) -> HandledOutcome {
    let event = match parse_webhook(body, event_type) {
        Ok(event) => event,
        Err(error) => {
            let span = tracing::info_span!("Webhook", event = event_type.unwrap_or_default());
            span.log_error(anyhow::Error::new(error).context("Could not parse webhook"));
            return HandledOutcome::Malformed;
        }
    };

    let span = tracing::info_span!(
        "Webhook",
        event = event.kind(),
        repo = event.repository().map(|repo| repo.to_string()),
        sender = event.sender(),
    );
    handle_event(client, event).instrument(span).await
}

/// Executes a single parsed webhook event.
pub async fn handle_event(client: &dyn GithubClient, event: InboundEvent) -> HandledOutcome {
    tracing::debug!("Received event: {event:#?}");
    match event {
        InboundEvent::Push(push) => {
            tracing::debug!("Ignoring push to {} in {}", push.git_ref, push.repository);
            HandledOutcome::Ignored
        }
        InboundEvent::Watch(watch) => handle_watch(watch),
        InboundEvent::PullRequest(pr) => handle_pull_request(client, pr).await,
        InboundEvent::IssueComment(comment) => handle_comment(client, comment).await,
        InboundEvent::Other(other) => {
            tracing::warn!("Unknown event type {}", other.event_type);
            HandledOutcome::UnknownEvent(other.event_type)
        }
    }
}

fn handle_watch(watch: WatchEvent) -> HandledOutcome {
    // GitHub sends `started` for new stars
    if matches!(watch.action.as_str(), "starred" | "started") {
        tracing::info!("{} starred repository {}", watch.sender, watch.repository);
        HandledOutcome::Starred
    } else {
        HandledOutcome::Ignored
    }
}

async fn handle_pull_request(client: &dyn GithubClient, pr: PullRequestEvent) -> HandledOutcome {
    if !matches!(pr.action.as_str(), "opened" | "reopened") {
        tracing::debug!("Ignoring pull request action {}", pr.action);
        return HandledOutcome::Ignored;
    }

    let reviewers = vec![pr.repository.owner().to_string()];
    let span = tracing::info_span!("Request reviewers", pr = %pr.pr_number);
    let result = request_reviewers(client, &pr.repository, pr.pr_number, &reviewers)
        .instrument(span)
        .await;
    HandledOutcome::Executed(vec![result])
}

async fn handle_comment(client: &dyn GithubClient, comment: IssueCommentEvent) -> HandledOutcome {
    tracing::info!("IssueCommentEvent: {}", comment.action);
    if !matches!(comment.action.as_str(), "created" | "edited") {
        return HandledOutcome::Ignored;
    }

    let commands = parse_commands(&comment.text);
    tracing::debug!("Commands: {commands:?}");
    tracing::trace!("Text: {}", comment.text);

    let repo = &comment.repository;
    let number = comment.issue_number;
    let mut results = Vec::with_capacity(commands.len());
    for command in commands {
        let result = match command {
            BotCommand::AddLabel(label) => {
                let span = tracing::info_span!("Add label", issue = %number);
                add_label(client, repo, number, &label)
                    .instrument(span)
                    .await
            }
            BotCommand::RemoveLabel(label) => {
                let span = tracing::info_span!("Remove label", issue = %number);
                remove_label(client, repo, number, &label)
                    .instrument(span)
                    .await
            }
            BotCommand::ApproveMerge => {
                let span = tracing::info_span!("Merge", pr = %number);
                merge_if_approved(client, repo, number)
                    .instrument(span)
                    .await
            }
        };
        tracing::debug!("Action result: {result:?}");
        results.push(result);
    }
    HandledOutcome::Executed(results)
}

/// Posts a comment, logging instead of failing when it cannot be sent.
async fn send_comment(
    client: &dyn GithubClient,
    repo: &GithubRepoName,
    issue: PullRequestNumber,
    comment: Comment,
) {
    tracing::info!("send comment to {repo} #{issue}: {}", comment.render());
    if let Err(error) = client.post_comment(repo, issue, comment).await {
        tracing::error!("Cannot post comment to {repo}#{issue}: {error:?}");
    }
}
