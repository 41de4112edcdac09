use anyhow::Context;
use axum::async_trait;
use octocrab::Octocrab;

use crate::bot::{Comment, GithubClient, MergeResult};
use crate::config::BotConfig;
use crate::github::api::create_github_client;
use crate::github::{GithubRepoName, PullRequestNumber};

/// Provides access to the GitHub API on behalf of the bot user.
pub struct GithubApiClient {
    client: Octocrab,
}

impl GithubApiClient {
    pub fn new(config: &BotConfig) -> anyhow::Result<Self> {
        Ok(Self {
            client: create_github_client(config)?,
        })
    }
}

fn format_issue(repo: &GithubRepoName, issue: PullRequestNumber) -> String {
    format!("{}/{}/{}", repo.owner(), repo.name(), issue)
}

#[derive(serde::Serialize)]
struct ReviewersRequest<'a> {
    reviewers: &'a [String],
}

#[async_trait]
impl GithubClient for GithubApiClient {
    async fn add_labels(
        &self,
        repo: &GithubRepoName,
        issue: PullRequestNumber,
        labels: &[String],
    ) -> anyhow::Result<()> {
        if !labels.is_empty() {
            self.client
                .issues(repo.owner(), repo.name())
                .add_labels(issue.0, labels)
                .await
                .with_context(|| format!("Cannot add label(s) to {}", format_issue(repo, issue)))?;
        }
        Ok(())
    }

    async fn remove_label(
        &self,
        repo: &GithubRepoName,
        issue: PullRequestNumber,
        label: &str,
    ) -> anyhow::Result<()> {
        self.client
            .issues(repo.owner(), repo.name())
            .remove_label(issue.0, label)
            .await
            .with_context(|| {
                format!("Cannot remove label from {}", format_issue(repo, issue))
            })?;
        Ok(())
    }

    /// Documentation: https://docs.github.com/en/rest/pulls/review-requests#request-reviewers-for-a-pull-request
    async fn request_reviewers(
        &self,
        repo: &GithubRepoName,
        pr: PullRequestNumber,
        reviewers: &[String],
    ) -> anyhow::Result<()> {
        let url = format!(
            "/repos/{}/{}/pulls/{}/requested_reviewers",
            repo.owner(),
            repo.name(),
            pr
        );
        let _: serde_json::Value = self
            .client
            .post(url, Some(&ReviewersRequest { reviewers }))
            .await
            .with_context(|| format!("Cannot request reviewers for {}", format_issue(repo, pr)))?;
        Ok(())
    }

    async fn is_merged(
        &self,
        repo: &GithubRepoName,
        pr: PullRequestNumber,
    ) -> anyhow::Result<bool> {
        let merged = self
            .client
            .pulls(repo.owner(), repo.name())
            .is_merged(pr.0)
            .await
            .with_context(|| format!("Cannot get merge status of {}", format_issue(repo, pr)))?;
        Ok(merged)
    }

    // The error is returned without context, because its text is shown to users.
    // `octocrab::Error::GitHub` only displays its variant name, the message sent by GitHub
    // is in its source.
    async fn merge(
        &self,
        repo: &GithubRepoName,
        pr: PullRequestNumber,
        commit_message: &str,
    ) -> anyhow::Result<MergeResult> {
        let response = self
            .client
            .pulls(repo.owner(), repo.name())
            .merge(pr.0)
            .message(commit_message)
            .send()
            .await
            .map_err(|error| match error {
                octocrab::Error::GitHub { source, .. } => anyhow::anyhow!("{source}"),
                error => anyhow::Error::new(error),
            })?;
        tracing::trace!("Merge response for {}: {response:?}", format_issue(repo, pr));
        Ok(MergeResult {
            merged: response.merged,
            message: response.message,
        })
    }

    /// The comment will be posted as the user that owns the bot token.
    async fn post_comment(
        &self,
        repo: &GithubRepoName,
        issue: PullRequestNumber,
        comment: Comment,
    ) -> anyhow::Result<()> {
        self.client
            .issues(repo.owner(), repo.name())
            .create_comment(issue.0, comment.render())
            .await
            .with_context(|| format!("Cannot post comment to {}", format_issue(repo, issue)))?;
        Ok(())
    }
}
