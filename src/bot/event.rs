use crate::github::{GithubRepoName, PullRequestNumber};

/// A webhook delivery after it has been parsed and classified by its event type.
#[derive(Debug)]
pub enum InboundEvent {
    /// Commits were pushed to a branch or tag.
    Push(PushEvent),
    /// Something happened to a pull request (opened, closed, ...).
    PullRequest(PullRequestEvent),
    /// Someone starred the repository.
    Watch(WatchEvent),
    /// A comment was posted, edited or deleted on an issue or a pull request.
    IssueComment(IssueCommentEvent),
    /// Any event type that the bot does not know about.
    Other(OtherEvent),
}

impl InboundEvent {
    /// Short name of the event, used for logging.
    pub fn kind(&self) -> &str {
        match self {
            InboundEvent::Push(_) => "push",
            InboundEvent::PullRequest(_) => "pull_request",
            InboundEvent::Watch(_) => "watch",
            InboundEvent::IssueComment(_) => "issue_comment",
            InboundEvent::Other(event) => &event.event_type,
        }
    }

    pub fn repository(&self) -> Option<&GithubRepoName> {
        match self {
            InboundEvent::Push(event) => Some(&event.repository),
            InboundEvent::PullRequest(event) => Some(&event.repository),
            InboundEvent::Watch(event) => Some(&event.repository),
            InboundEvent::IssueComment(event) => Some(&event.repository),
            InboundEvent::Other(event) => event.repository.as_ref(),
        }
    }

    /// Login of the user that triggered the event.
    pub fn sender(&self) -> Option<&str> {
        match self {
            InboundEvent::Push(event) => Some(&event.sender),
            InboundEvent::PullRequest(event) => Some(&event.sender),
            InboundEvent::Watch(event) => Some(&event.sender),
            InboundEvent::IssueComment(event) => Some(&event.sender),
            InboundEvent::Other(event) => event.sender.as_deref(),
        }
    }
}

#[derive(Debug)]
pub struct PushEvent {
    pub repository: GithubRepoName,
    pub sender: String,
    /// Full git ref that was pushed, e.g. `refs/heads/main`.
    pub git_ref: String,
}

#[derive(Debug)]
pub struct PullRequestEvent {
    pub repository: GithubRepoName,
    pub sender: String,
    pub action: String,
    pub pr_number: PullRequestNumber,
}

#[derive(Debug)]
pub struct WatchEvent {
    pub repository: GithubRepoName,
    pub sender: String,
    pub action: String,
}

#[derive(Debug)]
pub struct IssueCommentEvent {
    pub repository: GithubRepoName,
    pub sender: String,
    pub action: String,
    pub issue_number: PullRequestNumber,
    pub is_pull_request: bool,
    pub text: String,
}

#[derive(Debug)]
pub struct OtherEvent {
    /// Value of the `X-GitHub-Event` header.
    pub event_type: String,
    pub repository: Option<GithubRepoName>,
    pub sender: Option<String>,
}
