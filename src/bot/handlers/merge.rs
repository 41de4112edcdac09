use crate::bot::comment::{
    merge_commit_message, merge_error_comment, merge_failed_comment, pr_merged_comment,
};
use crate::bot::handlers::{send_comment, ActionResult};
use crate::bot::{Comment, GithubClient, MergeResult};
use crate::github::{GithubRepoName, PullRequestNumber};

/// Merges the pull request, unless it has already been merged.
///
/// Every path ends with a comment on the pull request, so that each merge attempt
/// leaves a visible trace:
/// - already merged or merged now: `PR #N was merged.`
/// - GitHub refused to merge (e.g. branch protection): `Fail to merge this PR #N`
/// - the request itself failed: the error text
pub async fn merge_if_approved(
    client: &dyn GithubClient,
    repo: &GithubRepoName,
    pr: PullRequestNumber,
) -> ActionResult {
    let already_merged = match client.is_merged(repo, pr).await {
        Ok(merged) => merged,
        Err(error) => {
            tracing::warn!(
                "Cannot find out if {repo}#{pr} is merged, assuming it is not: {error:?}"
            );
            false
        }
    };

    if already_merged {
        tracing::info!("PR {repo}#{pr} was already merged");
        return report(client, repo, pr, true, pr_merged_comment(pr)).await;
    }

    let commit_message = merge_commit_message(pr);
    tracing::info!("Starting to {commit_message}");
    let (succeeded, comment) = match client.merge(repo, pr, &commit_message).await {
        Ok(MergeResult { merged: true, .. }) => (true, pr_merged_comment(pr)),
        Ok(MergeResult {
            merged: false,
            message,
        }) => {
            tracing::warn!("GitHub did not merge {repo}#{pr}: {message:?}");
            (false, merge_failed_comment(pr))
        }
        Err(error) => {
            tracing::error!("Cannot merge {repo}#{pr}: {error:?}");
            (false, merge_error_comment(&error))
        }
    };
    report(client, repo, pr, succeeded, comment).await
}

async fn report(
    client: &dyn GithubClient,
    repo: &GithubRepoName,
    pr: PullRequestNumber,
    succeeded: bool,
    comment: Comment,
) -> ActionResult {
    let message = comment.render().to_string();
    send_comment(client, repo, pr, comment).await;
    ActionResult { succeeded, message }
}
