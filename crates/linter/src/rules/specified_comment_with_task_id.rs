//! ringcentral/specified-comment-with-task-id
//!
//! Require TODO and FIXME comments to reference a task id or a username.

use once_cell::sync::Lazy;
use oxc_ast::ast::Program;
use regex::Regex;

use crate::diagnostic::Diagnostic;
use crate::utils::comment_body;
use crate::{RuleCategory, RuleMeta};

pub const MESSAGE: &str = "Please specify comment with a task id or username (e.g. TODO [UIA-12345] summary | TODO (username) summary)";

/// Word boundaries are ASCII: `éTODO` still carries the marker
static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?-u:\b)(todo|fixme)(?-u:\b)").unwrap());

/// `[PROJECT-123]`: an uppercase letter, uppercase letters or digits, a dash and digits.
/// A bare tag such as `[ABC]` or `[abc-]` never matches.
static TASK_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[[A-Z][A-Z0-9]+-[0-9]+\]").unwrap());

/// `(username)` on a single line; `\r`, U+2028 and U+2029 also end a line
static ANNOTATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\([^\r\n\u{2028}\u{2029}]+\)").unwrap());

/// specified-comment-with-task-id rule
#[derive(Debug, Clone, Default)]
pub struct SpecifiedCommentWithTaskId;

impl RuleMeta for SpecifiedCommentWithTaskId {
    const NAME: &'static str = "specified-comment-with-task-id";
    const CATEGORY: RuleCategory = RuleCategory::Layout;
    const DESCRIPTION: &'static str =
        "Specify TODO / FIXME comments with a task id or username";

    fn docs_url() -> String {
        "https://github.com/ringcentral/ringcentral-javascript#specify-todo--fixme-comment-with-jira-or-another-bug-tracking-system-task-id-or-username".to_string()
    }
}

impl SpecifiedCommentWithTaskId {
    pub fn new() -> Self {
        Self
    }

    /// Check every comment of a program
    pub fn check<'a>(&self, program: &Program<'a>, source: &str) -> Vec<Diagnostic> {
        program
            .comments
            .iter()
            .filter(|comment| is_unspecified(comment_body(source, comment.span)))
            .map(|comment| Diagnostic::warning(Self::NAME, comment.span, MESSAGE))
            .collect()
    }
}

/// Returns `true` if the comment text carries a TODO/FIXME marker without a
/// task id or username
pub fn is_unspecified(text: &str) -> bool {
    MARKER_RE.is_match(text) && !TASK_ID_RE.is_match(text) && !ANNOTATION_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_name() {
        assert_eq!(SpecifiedCommentWithTaskId::NAME, "specified-comment-with-task-id");
        assert_eq!(
            SpecifiedCommentWithTaskId::id(),
            "ringcentral/specified-comment-with-task-id"
        );
    }

    #[test]
    fn test_specified_comments() {
        for text in [
            " TODO [RLZ-12345]",
            " todo [RLZ-12345]",
            " fixme [RLZ-12345]",
            " FIXME [RLZ-12345]",
            " TODO [RLZ-12345] summary",
            " FIXME [RLZ-12345] summary",
            " TODO \n some comment \n [UIA-98765] ",
            " TODO (username) summary",
            " FIXME (username) summary",
            " TODO [ABC-123]",
            " TODO [A1B2-7]",
        ] {
            assert!(!is_unspecified(text), "{text:?} should be accepted");
        }
    }

    #[test]
    fn test_unspecified_comments() {
        for text in [
            " TODO summary",
            " FIXME summary",
            " todo summary",
            " fixme summary",
            " FiXme summary",
            " TODO \n summary ",
            " TODO () summary",
            " TODO [ABC]",
            " TODO [abc-123]",
            " TODO [A-1]",
            " TODO [RLZ-]",
            " TODO ( \n username)",
            " TODO [RLZ-\u{661}\u{662}\u{663}]",
            " \u{e9}TODO summary",
            " TODO (\r) summary",
            " TODO (user\u{2028}name) summary",
        ] {
            assert!(is_unspecified(text), "{text:?} should be reported");
        }
    }

    #[test]
    fn test_marker_must_be_a_word() {
        assert!(!is_unspecified(" todos are tracked elsewhere"));
        assert!(!is_unspecified(" mastodon"));
        assert!(!is_unspecified(" a plain comment"));
        assert!(is_unspecified(" TODO: summary"));
    }
}
