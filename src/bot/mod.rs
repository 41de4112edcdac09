use axum::async_trait;

use crate::github::{GithubRepoName, PullRequestNumber};

pub(crate) mod comment;
pub mod command;
pub mod event;
pub mod handlers;

pub use comment::Comment;
pub use handlers::{dispatch, handle_event};

/// Outcome of a merge request sent to GitHub that did not fail on the transport level.
#[derive(Clone, Debug, PartialEq)]
pub struct MergeResult {
    /// `false` when GitHub refused to merge, e.g. because of branch protection.
    pub merged: bool,
    pub message: Option<String>,
}

/// Provides the remote GitHub operations that the bot can perform.
/// It is behind a trait to allow easier mocking in tests.
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Add a set of labels to an issue or a pull request.
    async fn add_labels(
        &self,
        repo: &GithubRepoName,
        issue: PullRequestNumber,
        labels: &[String],
    ) -> anyhow::Result<()>;

    /// Remove a single label from an issue or a pull request.
    async fn remove_label(
        &self,
        repo: &GithubRepoName,
        issue: PullRequestNumber,
        label: &str,
    ) -> anyhow::Result<()>;

    /// Ask the given users to review a pull request.
    async fn request_reviewers(
        &self,
        repo: &GithubRepoName,
        pr: PullRequestNumber,
        reviewers: &[String],
    ) -> anyhow::Result<()>;

    /// Has the pull request already been merged?
    async fn is_merged(&self, repo: &GithubRepoName, pr: PullRequestNumber)
        -> anyhow::Result<bool>;

    /// Merge the pull request using the given merge commit message.
    async fn merge(
        &self,
        repo: &GithubRepoName,
        pr: PullRequestNumber,
        commit_message: &str,
    ) -> anyhow::Result<MergeResult>;

    /// Post a comment to the issue or pull request with the given number.
    async fn post_comment(
        &self,
        repo: &GithubRepoName,
        issue: PullRequestNumber,
        comment: Comment,
    ) -> anyhow::Result<()>;
}
