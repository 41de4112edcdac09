use crate::bot::handlers::ActionResult;
use crate::bot::GithubClient;
use crate::github::{GithubRepoName, PullRequestNumber};

/// Requests a review of the pull request from the given users.
/// Failures are only logged.
pub async fn request_reviewers(
    client: &dyn GithubClient,
    repo: &GithubRepoName,
    pr: PullRequestNumber,
    reviewers: &[String],
) -> ActionResult {
    tracing::info!("Requesting review from {reviewers:?}");
    match client.request_reviewers(repo, pr, reviewers).await {
        Ok(()) => ActionResult::success(format!(
            "Requested review of {repo}#{pr} from {}",
            reviewers.join(", ")
        )),
        Err(error) => {
            tracing::error!("Cannot request reviewers for {repo}#{pr}: {error:?}");
            ActionResult::failure(error.to_string())
        }
    }
}
