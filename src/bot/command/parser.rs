//! Defines parsers for bot commands.
//!
//! Keywords are matched as whole whitespace-separated tokens, and only their first
//! occurrence in a comment counts. Each keyword is looked up independently, so one
//! comment can trigger several commands.

use crate::bot::command::{BotCommand, CommandKeyword};

/// Result of looking up a single keyword in a comment.
#[derive(Debug, PartialEq)]
pub enum KeywordMatch<'a> {
    /// The keyword does not appear in the comment.
    Absent,
    /// The keyword is the last token of the comment.
    Bare,
    /// The keyword is followed by this token.
    WithArgument(&'a str),
}

/// Finds the first token equal to `keyword` in `text` and returns the token that follows it.
pub fn extract(text: &str, keyword: CommandKeyword) -> KeywordMatch<'_> {
    let mut tokens = text.split_whitespace();
    if !tokens.any(|token| token == keyword.trigger()) {
        return KeywordMatch::Absent;
    }
    match tokens.next() {
        Some(argument) => KeywordMatch::WithArgument(argument),
        None => KeywordMatch::Bare,
    }
}

/// Parses all bot commands from the given comment text.
///
/// Commands are returned in the order in which they should be executed. Label commands
/// without a label name are skipped.
pub fn parse_commands(text: &str) -> Vec<BotCommand> {
    CommandKeyword::ALL
        .into_iter()
        .filter_map(|keyword| parse_keyword(text, keyword))
        .collect()
}

fn parse_keyword(text: &str, keyword: CommandKeyword) -> Option<BotCommand> {
    let found = extract(text, keyword);
    match keyword {
        CommandKeyword::Label => argument(found).map(BotCommand::AddLabel),
        CommandKeyword::Unlabel => argument(found).map(BotCommand::RemoveLabel),
        // `/lgtm` does not take an argument, anything after it is ignored
        CommandKeyword::ApproveMerge => match found {
            KeywordMatch::Absent => None,
            KeywordMatch::Bare | KeywordMatch::WithArgument(_) => Some(BotCommand::ApproveMerge),
        },
    }
}

fn argument(found: KeywordMatch<'_>) -> Option<String> {
    match found {
        KeywordMatch::WithArgument(argument) if !argument.is_empty() => {
            Some(argument.to_string())
        }
        KeywordMatch::WithArgument(_) | KeywordMatch::Bare => {
            tracing::debug!("Ignoring command without an argument");
            None
        }
        KeywordMatch::Absent => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_absent() {
        assert_eq!(
            extract("hello world", CommandKeyword::Label),
            KeywordMatch::Absent
        );
    }

    #[test]
    fn extract_empty_text() {
        assert_eq!(extract("", CommandKeyword::Label), KeywordMatch::Absent);
    }

    #[test]
    fn extract_with_argument() {
        assert_eq!(
            extract("/label bug", CommandKeyword::Label),
            KeywordMatch::WithArgument("bug")
        );
    }

    #[test]
    fn extract_keyword_as_last_token() {
        assert_eq!(
            extract("please /label", CommandKeyword::Label),
            KeywordMatch::Bare
        );
    }

    #[test]
    fn extract_trailing_whitespace() {
        assert_eq!(
            extract("/label \n\t ", CommandKeyword::Label),
            KeywordMatch::Bare
        );
    }

    #[test]
    fn extract_across_lines() {
        assert_eq!(
            extract("Looks fine.\n/label\nenhancement", CommandKeyword::Label),
            KeywordMatch::WithArgument("enhancement")
        );
    }

    #[test]
    fn extract_first_occurrence() {
        assert_eq!(
            extract("/label a /label b", CommandKeyword::Label),
            KeywordMatch::WithArgument("a")
        );
    }

    #[test]
    fn extract_requires_exact_token() {
        assert_eq!(
            extract("/labels bug", CommandKeyword::Label),
            KeywordMatch::Absent
        );
        assert_eq!(
            extract("x/label bug", CommandKeyword::Label),
            KeywordMatch::Absent
        );
    }

    #[test]
    fn extract_label_does_not_match_unlabel() {
        assert_eq!(
            extract("/un-label bug", CommandKeyword::Label),
            KeywordMatch::Absent
        );
        assert_eq!(
            extract("/un-label bug", CommandKeyword::Unlabel),
            KeywordMatch::WithArgument("bug")
        );
    }

    #[test]
    fn extract_is_case_sensitive() {
        assert_eq!(
            extract("/LGTM", CommandKeyword::ApproveMerge),
            KeywordMatch::Absent
        );
    }

    #[test]
    fn parse_nothing() {
        assert!(parse_commands("Thanks for the PR!").is_empty());
    }

    #[test]
    fn parse_label() {
        assert_eq!(
            parse_commands("/label foo"),
            vec![BotCommand::AddLabel("foo".to_string())]
        );
    }

    #[test]
    fn parse_label_inside_text() {
        assert_eq!(
            parse_commands("I think this is a bug, /label bug thanks"),
            vec![BotCommand::AddLabel("bug".to_string())]
        );
    }

    #[test]
    fn parse_label_missing_argument() {
        assert!(parse_commands("/label").is_empty());
        assert!(parse_commands("something /label").is_empty());
    }

    #[test]
    fn parse_unlabel() {
        assert_eq!(
            parse_commands("/un-label wontfix"),
            vec![BotCommand::RemoveLabel("wontfix".to_string())]
        );
    }

    #[test]
    fn parse_unlabel_missing_argument() {
        assert!(parse_commands("/un-label").is_empty());
    }

    #[test]
    fn parse_lgtm() {
        assert_eq!(parse_commands("/lgtm"), vec![BotCommand::ApproveMerge]);
    }

    #[test]
    fn parse_lgtm_ignores_argument() {
        assert_eq!(parse_commands("/lgtm now"), vec![BotCommand::ApproveMerge]);
    }

    #[test]
    fn parse_label_and_lgtm() {
        assert_eq!(
            parse_commands("/label bug /lgtm"),
            vec![
                BotCommand::AddLabel("bug".to_string()),
                BotCommand::ApproveMerge
            ]
        );
    }

    #[test]
    fn parse_label_before_lgtm() {
        // `/lgtm` is the label name here, but it also triggers the merge
        assert_eq!(
            parse_commands("/label /lgtm"),
            vec![
                BotCommand::AddLabel("/lgtm".to_string()),
                BotCommand::ApproveMerge
            ]
        );
    }

    #[test]
    fn parse_commands_in_priority_order() {
        assert_eq!(
            parse_commands("/lgtm /un-label wip /label ready"),
            vec![
                BotCommand::AddLabel("ready".to_string()),
                BotCommand::RemoveLabel("wip".to_string()),
                BotCommand::ApproveMerge
            ]
        );
    }

    #[test]
    fn parse_each_keyword_once() {
        assert_eq!(
            parse_commands("/lgtm /lgtm /label a /label b"),
            vec![
                BotCommand::AddLabel("a".to_string()),
                BotCommand::ApproveMerge
            ]
        );
    }

    #[test]
    fn command_keywords() {
        assert_eq!(
            BotCommand::AddLabel("a".to_string()).keyword(),
            CommandKeyword::Label
        );
        assert_eq!(
            BotCommand::RemoveLabel("a".to_string()).keyword(),
            CommandKeyword::Unlabel
        );
        assert_eq!(
            BotCommand::ApproveMerge.keyword(),
            CommandKeyword::ApproveMerge
        );
    }
}
