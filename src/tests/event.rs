use derive_builder::Builder;

use crate::bot::event::{InboundEvent, IssueCommentEvent, PullRequestEvent, PushEvent, WatchEvent};
use crate::github::{GithubRepoName, PullRequestNumber};
use crate::tests::client::default_repo_name;

pub fn default_pr_number() -> u64 {
    1
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Comment {
    #[builder(default = "default_repo_name()")]
    repo: GithubRepoName,
    #[builder(default = "default_pr_number()")]
    issue_number: u64,
    #[builder(setter(into))]
    text: String,
    #[builder(setter(into), default = "\"created\".to_string()")]
    action: String,
    #[builder(setter(into), default = "\"commenter\".to_string()")]
    sender: String,
}

impl CommentBuilder {
    pub fn create(self) -> IssueCommentEvent {
        let Comment {
            repo,
            issue_number,
            text,
            action,
            sender,
        } = self.build().unwrap();
        IssueCommentEvent {
            repository: repo,
            sender,
            action,
            issue_number: PullRequestNumber(issue_number),
            is_pull_request: true,
            text,
        }
    }
}

pub fn comment(text: &str) -> CommentBuilder {
    CommentBuilder::default().text(text)
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct PullRequest {
    #[builder(default = "default_repo_name()")]
    repo: GithubRepoName,
    #[builder(default = "default_pr_number()")]
    pr_number: u64,
    #[builder(setter(into))]
    action: String,
    #[builder(setter(into), default = "\"author\".to_string()")]
    sender: String,
}

impl PullRequestBuilder {
    pub fn create(self) -> PullRequestEvent {
        let PullRequest {
            repo,
            pr_number,
            action,
            sender,
        } = self.build().unwrap();
        PullRequestEvent {
            repository: repo,
            sender,
            action,
            pr_number: PullRequestNumber(pr_number),
        }
    }
}

pub fn pull_request(action: &str) -> PullRequestBuilder {
    PullRequestBuilder::default().action(action)
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Watch {
    #[builder(default = "default_repo_name()")]
    repo: GithubRepoName,
    #[builder(setter(into))]
    action: String,
    #[builder(setter(into), default = "\"fan\".to_string()")]
    sender: String,
}

impl WatchBuilder {
    pub fn create(self) -> WatchEvent {
        let Watch {
            repo,
            action,
            sender,
        } = self.build().unwrap();
        WatchEvent {
            repository: repo,
            sender,
            action,
        }
    }
}

pub fn watch(action: &str) -> WatchBuilder {
    WatchBuilder::default().action(action)
}

#[derive(Builder)]
#[builder(pattern = "owned")]
pub struct Push {
    #[builder(default = "default_repo_name()")]
    repo: GithubRepoName,
    #[builder(setter(into), default = "\"refs/heads/main\".to_string()")]
    git_ref: String,
}

impl PushBuilder {
    pub fn create(self) -> PushEvent {
        let Push { repo, git_ref } = self.build().unwrap();
        PushEvent {
            repository: repo,
            sender: "pusher".to_string(),
            git_ref,
        }
    }
}

pub fn push() -> PushBuilder {
    PushBuilder::default()
}

impl From<IssueCommentEvent> for InboundEvent {
    fn from(value: IssueCommentEvent) -> Self {
        InboundEvent::IssueComment(value)
    }
}

impl From<PullRequestEvent> for InboundEvent {
    fn from(value: PullRequestEvent) -> Self {
        InboundEvent::PullRequest(value)
    }
}

impl From<WatchEvent> for InboundEvent {
    fn from(value: WatchEvent) -> Self {
        InboundEvent::Watch(value)
    }
}

impl From<PushEvent> for InboundEvent {
    fn from(value: PushEvent) -> Self {
        InboundEvent::Push(value)
    }
}

fn repository_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "name": "name",
        "full_name": "owner/name",
        "owner": { "login": "owner", "id": 2 }
    })
}

/// Body of an `issue_comment` webhook on a pull request, as sent by GitHub.
pub fn issue_comment_payload(action: &str, number: u64, text: &str) -> String {
    serde_json::json!({
        "action": action,
        "issue": {
            "number": number,
            "title": "Fix the build",
            "pull_request": {
                "url": format!("https://api.github.com/repos/owner/name/pulls/{number}")
            }
        },
        "comment": { "id": 100, "body": text, "user": { "login": "commenter" } },
        "repository": repository_json(),
        "sender": { "login": "commenter", "id": 3 }
    })
    .to_string()
}

/// Body of a `pull_request` webhook, as sent by GitHub.
pub fn pull_request_payload(action: &str, number: u64) -> String {
    serde_json::json!({
        "action": action,
        "number": number,
        "pull_request": { "number": number, "state": "open", "merged": false },
        "repository": repository_json(),
        "sender": { "login": "author", "id": 4 }
    })
    .to_string()
}
