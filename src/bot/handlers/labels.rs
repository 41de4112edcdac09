use crate::bot::handlers::ActionResult;
use crate::bot::GithubClient;
use crate::github::{GithubRepoName, PullRequestNumber};

/// Adds a single label to the given issue or pull request.
/// Failures are only logged, nothing is posted back to the issue.
pub async fn add_label(
    client: &dyn GithubClient,
    repo: &GithubRepoName,
    issue: PullRequestNumber,
    label: &str,
) -> ActionResult {
    tracing::info!("Adding label {label}");
    match client.add_labels(repo, issue, &[label.to_string()]).await {
        Ok(()) => ActionResult::success(format!("Added label `{label}` to {repo}#{issue}")),
        Err(error) => {
            tracing::error!("Cannot add label {label} to {repo}#{issue}: {error:?}");
            ActionResult::failure(error.to_string())
        }
    }
}

/// Removes a single label from the given issue or pull request.
/// Failures are only logged, nothing is posted back to the issue.
pub async fn remove_label(
    client: &dyn GithubClient,
    repo: &GithubRepoName,
    issue: PullRequestNumber,
    label: &str,
) -> ActionResult {
    tracing::info!("Removing label {label}");
    match client.remove_label(repo, issue, label).await {
        Ok(()) => ActionResult::success(format!("Removed label `{label}` from {repo}#{issue}")),
        Err(error) => {
            tracing::error!("Cannot remove label {label} from {repo}#{issue}: {error:?}");
            ActionResult::failure(error.to_string())
        }
    }
}
