use crate::github::PullRequestNumber;

/// A comment that can be posted to an issue or a pull request.
#[derive(Clone, Debug, PartialEq)]
pub struct Comment {
    text: String,
}

impl Comment {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn render(&self) -> &str {
        &self.text
    }
}

pub fn pr_merged_comment(pr: PullRequestNumber) -> Comment {
    Comment::new(format!("PR #{pr} was merged."))
}

pub fn merge_failed_comment(pr: PullRequestNumber) -> Comment {
    Comment::new(format!("Fail to merge this PR #{pr}"))
}

/// The error is posted verbatim, so that users see exactly what GitHub responded with.
pub fn merge_error_comment(error: &anyhow::Error) -> Comment {
    Comment::new(error.to_string())
}

pub fn merge_commit_message(pr: PullRequestNumber) -> String {
    format!("merge: PR(#{pr})")
}
