mod parser;

pub use parser::{extract, parse_commands, KeywordMatch};

/// Trigger keywords recognized in comments.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandKeyword {
    /// `/label <name>`
    Label,
    /// `/un-label <name>`
    Unlabel,
    /// `/lgtm`
    ApproveMerge,
}

impl CommandKeyword {
    /// All keywords, in the order in which their commands are executed.
    pub const ALL: [CommandKeyword; 3] = [
        CommandKeyword::Label,
        CommandKeyword::Unlabel,
        CommandKeyword::ApproveMerge,
    ];

    /// The exact token that has to appear in a comment.
    pub fn trigger(&self) -> &'static str {
        match self {
            CommandKeyword::Label => "/label",
            CommandKeyword::Unlabel => "/un-label",
            CommandKeyword::ApproveMerge => "/lgtm",
        }
    }
}

/// Bot command specified by a user.
#[derive(Clone, Debug, PartialEq)]
pub enum BotCommand {
    /// Add a label to the issue or pull request.
    AddLabel(String),
    /// Remove a label from the issue or pull request.
    RemoveLabel(String),
    /// Merge the pull request, unless it was already merged.
    ApproveMerge,
}

impl BotCommand {
    pub fn keyword(&self) -> CommandKeyword {
        match self {
            BotCommand::AddLabel(_) => CommandKeyword::Label,
            BotCommand::RemoveLabel(_) => CommandKeyword::Unlabel,
            BotCommand::ApproveMerge => CommandKeyword::ApproveMerge,
        }
    }
}
