// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Commit message structure and parsing.

use crate::error::{CommitError, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `type`, `type(scope)` or `type(scope)!` in front of the header's colon.
    static ref TYPE_REGEX: Regex =
        Regex::new(r"^(?P<type>[^()!\s]*)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?$").unwrap();

    /// Lines that open the footer: breaking change notes, issue references
    /// and `*-by:` trailers.
    static ref FOOTER_REGEX: Regex = Regex::new(
        r"^(?:BREAKING[ -]CHANGE:\s|(?i:(?:close[sd]?|fix(?:e[sd])?|resolve[sd]?):?\s+#\d+)|(?i:[a-z][\w-]*-by:\s))"
    )
    .unwrap();

    /// Git's scissors line; everything below it is diff context.
    static ref SCISSORS_REGEX: Regex = Regex::new(r"^# -+ >8 -+$").unwrap();
}

/// A commit message split into its conventional-commit fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommit {
    /// Commit type (feat, fix, etc.); empty when the header starts with `:`.
    pub commit_type: String,
    /// Optional scope, without the parentheses.
    pub scope: Option<String>,
    /// Subject line, trimmed.
    pub subject: String,
    /// Optional body.
    pub body: Option<String>,
    /// Optional footer (references, breaking change notes, trailers).
    pub footer: Option<String>,
    /// Whether this is a breaking change.
    pub is_breaking: bool,
    /// The first line, verbatim.
    pub header: String,
    /// The cleaned message the fields were taken from.
    pub raw: String,
    /// Zero-based line index of the first body line in `raw`.
    pub body_line: Option<usize>,
    /// Zero-based line index of the first footer line in `raw`.
    pub footer_line: Option<usize>,
}

impl ParsedCommit {
    /// Parse a commit message as written in an editor.
    ///
    /// Comment lines and everything below a scissors line are dropped
    /// first. Fails only when nothing is left or the header has no `:`.
    pub fn parse(message: &str) -> Result<Self> {
        Self::from_text(clean_message(message))
    }

    /// Parse a commit message as stored in git history.
    ///
    /// Git already removed its comments when the commit was made, so lines
    /// starting with `#` are content here and are kept.
    pub fn parse_raw(message: &str) -> Result<Self> {
        Self::from_text(normalize_message(message))
    }

    fn from_text(raw: String) -> Result<Self> {
        if raw.is_empty() {
            return Err(CommitError::EmptyMessage.into());
        }

        let lines: Vec<&str> = raw.lines().collect();
        let header = lines[0].to_string();

        let (prefix, rest) = split_header(&header).ok_or_else(|| CommitError::MissingSeparator {
            header: header.clone(),
        })?;

        let (commit_type, scope, bang) = match TYPE_REGEX.captures(prefix) {
            Some(captures) => (
                captures["type"].to_string(),
                captures.name("scope").map(|m| m.as_str().to_string()),
                captures.name("breaking").is_some(),
            ),
            None => (prefix.trim().to_string(), None, false),
        };
        let subject = rest.trim().to_string();

        let footer_line = lines
            .iter()
            .skip(1)
            .position(|line| FOOTER_REGEX.is_match(line))
            .map(|idx| idx + 1);
        let body_end = footer_line.unwrap_or(lines.len());

        let body_line = (1..body_end).find(|&idx| !lines[idx].trim().is_empty());
        let body = body_line.map(|start| join_trimmed(&lines[start..body_end]));
        let footer = footer_line.map(|start| join_trimmed(&lines[start..]));

        let is_breaking = bang
            || footer
                .as_ref()
                .map(|f| f.contains("BREAKING CHANGE") || f.contains("BREAKING-CHANGE"))
                .unwrap_or(false);

        Ok(Self {
            commit_type,
            scope,
            subject,
            body,
            footer,
            is_breaking,
            header,
            raw,
            body_line,
            footer_line,
        })
    }

    /// Header length in characters.
    pub fn header_len(&self) -> usize {
        self.header.chars().count()
    }

    /// Individual scopes; `kcm,kded` and `kcm/kded` name two.
    pub fn scopes(&self) -> Vec<&str> {
        self.scope
            .as_deref()
            .map(|scope| {
                scope
                    .split([',', '/', '\\'])
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The first whitespace-separated word of the subject.
    pub fn subject_first_word(&self) -> Option<&str> {
        self.subject.split_whitespace().next()
    }

    /// Body lines with their 1-based line numbers in the message.
    pub fn body_lines(&self) -> Vec<(usize, &str)> {
        let Some(start) = self.body_line else {
            return Vec::new();
        };
        let end = self.footer_line.unwrap_or(usize::MAX);

        self.raw
            .lines()
            .enumerate()
            .skip(start)
            .take_while(|(idx, _)| *idx < end)
            .map(|(idx, line)| (idx + 1, line))
            .collect()
    }

    /// Whether the line right above `index` is blank.
    pub fn is_preceded_by_blank(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|prev| self.raw.lines().nth(prev))
            .map(|line| line.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Drop git comment lines and scissors output, and trim surrounding blank lines.
pub fn clean_message(message: &str) -> String {
    let kept: Vec<&str> = message
        .lines()
        .take_while(|line| !SCISSORS_REGEX.is_match(line))
        .filter(|line| !line.starts_with('#'))
        .map(str::trim_end)
        .collect();

    join_trimmed(&kept)
}

/// Trim trailing whitespace and surrounding blank lines, keeping every line.
pub fn normalize_message(message: &str) -> String {
    let kept: Vec<&str> = message.lines().map(str::trim_end).collect();
    join_trimmed(&kept)
}

/// Split a header at the first `:` outside parentheses.
///
/// Unbalanced parentheses fall back to the first `:` anywhere, so only a
/// header without any colon is rejected.
fn split_header(header: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, ch) in header.char_indices() {
        match ch {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ':' if depth == 0 => return Some((&header[..idx], &header[idx + 1..])),
            _ => {}
        }
    }
    header.split_once(':')
}

fn join_trimmed(lines: &[&str]) -> String {
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());
    match (start, end) {
        (Some(start), Some(end)) => lines[start..=end].join("\n"),
        _ => String::new(),
    }
}

/// Parse a commit message as written in an editor.
pub fn parse(message: &str) -> Result<ParsedCommit> {
    ParsedCommit::parse(message)
}

/// Parse a commit message read from git history.
pub fn parse_raw(message: &str) -> Result<ParsedCommit> {
    ParsedCommit::parse_raw(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LintError;

    #[test]
    fn test_parse_type_scope_subject() {
        let msg = ParsedCommit::parse("feat(kcm): add new toggle").unwrap();
        assert_eq!(msg.commit_type, "feat");
        assert_eq!(msg.scope, Some("kcm".to_string()));
        assert_eq!(msg.subject, "add new toggle");
        assert_eq!(msg.header, "feat(kcm): add new toggle");
        assert!(msg.body.is_none());
        assert!(msg.footer.is_none());
        assert!(!msg.is_breaking);
    }

    #[test]
    fn test_parse_without_scope() {
        let msg = ParsedCommit::parse("fix: patch bug").unwrap();
        assert_eq!(msg.commit_type, "fix");
        assert!(msg.scope.is_none());
        assert_eq!(msg.subject, "patch bug");
    }

    #[test]
    fn test_parse_keeps_case() {
        let msg = ParsedCommit::parse("Feat: Add New Toggle.").unwrap();
        assert_eq!(msg.commit_type, "Feat");
        assert_eq!(msg.subject, "Add New Toggle.");
    }

    #[test]
    fn test_parse_missing_separator() {
        let err = ParsedCommit::parse("just a message").unwrap_err();
        assert!(matches!(
            err,
            LintError::Commit(CommitError::MissingSeparator { ref header }) if header == "just a message"
        ));
    }

    #[test]
    fn test_parse_empty_message() {
        let err = ParsedCommit::parse("\n# only a comment\n").unwrap_err();
        assert!(matches!(err, LintError::Commit(CommitError::EmptyMessage)));
    }

    #[test]
    fn test_parse_empty_type() {
        let msg = ParsedCommit::parse(": subject only").unwrap();
        assert_eq!(msg.commit_type, "");
        assert_eq!(msg.subject, "subject only");
    }

    #[test]
    fn test_parse_empty_subject() {
        let msg = ParsedCommit::parse("feat:   ").unwrap();
        assert_eq!(msg.subject, "");
    }

    #[test]
    fn test_parse_breaking_marker() {
        let msg = ParsedCommit::parse("feat(kded)!: drop legacy config").unwrap();
        assert!(msg.is_breaking);
        assert_eq!(msg.scope, Some("kded".to_string()));
        assert_eq!(msg.commit_type, "feat");
    }

    #[test]
    fn test_parse_colon_inside_scope() {
        let msg = ParsedCommit::parse("fix(a:b): handle colon").unwrap();
        assert_eq!(msg.scope, Some("a:b".to_string()));
        assert_eq!(msg.subject, "handle colon");
    }

    #[test]
    fn test_parse_unclosed_scope() {
        let msg = ParsedCommit::parse("fix(kcm: add toggle").unwrap();
        assert_eq!(msg.commit_type, "fix(kcm");
        assert!(msg.scope.is_none());
        assert_eq!(msg.subject, "add toggle");
    }

    #[test]
    fn test_parse_body_and_footer() {
        let raw = "fix(kcm): clamp scale\n\nScale could go negative.\nNow it cannot.\n\nBREAKING CHANGE: scale is unsigned\nCloses #42";
        let msg = ParsedCommit::parse(raw).unwrap();
        assert_eq!(
            msg.body,
            Some("Scale could go negative.\nNow it cannot.".to_string())
        );
        assert_eq!(
            msg.footer,
            Some("BREAKING CHANGE: scale is unsigned\nCloses #42".to_string())
        );
        assert_eq!(msg.body_line, Some(2));
        assert_eq!(msg.footer_line, Some(5));
        assert!(msg.is_breaking);
    }

    #[test]
    fn test_parse_footer_without_body() {
        let msg = ParsedCommit::parse("fix: typo\n\nSigned-off-by: Jane <jane@example.com>").unwrap();
        assert!(msg.body.is_none());
        assert_eq!(msg.footer_line, Some(2));
        assert!(msg.is_preceded_by_blank(2));
    }

    #[test]
    fn test_parse_body_without_blank_line() {
        let msg = ParsedCommit::parse("fix: typo\nbody right away").unwrap();
        assert_eq!(msg.body_line, Some(1));
        assert!(!msg.is_preceded_by_blank(1));
    }

    #[test]
    fn test_parse_strips_comments_and_scissors() {
        let raw = "feat: add toggle\n\n# Please enter the commit message\n# ------------------------ >8 ------------------------\ndiff --git a/x b/x\n";
        let msg = ParsedCommit::parse(raw).unwrap();
        assert_eq!(msg.raw, "feat: add toggle");
        assert!(msg.body.is_none());
    }

    #[test]
    fn test_parse_raw_keeps_hash_lines() {
        let raw = "fix(kded): guard macro\n\n#define KDED_TIMEOUT 1\nset at build time";
        let msg = ParsedCommit::parse_raw(raw).unwrap();
        assert_eq!(
            msg.body,
            Some("#define KDED_TIMEOUT 1\nset at build time".to_string())
        );
        assert_eq!(msg.body_lines()[0], (3, "#define KDED_TIMEOUT 1"));

        let edited = ParsedCommit::parse(raw).unwrap();
        assert_eq!(edited.body, Some("set at build time".to_string()));
    }

    #[test]
    fn test_body_lines_numbers() {
        let msg = ParsedCommit::parse("feat: x\n\nline one\nline two\n\nCloses #1").unwrap();
        let lines = msg.body_lines();
        assert_eq!(lines, vec![(3, "line one"), (4, "line two"), (5, "")]);
    }

    #[test]
    fn test_scopes_split() {
        let msg = ParsedCommit::parse("fix(kcm, kded/plasmoid): sync").unwrap();
        assert_eq!(msg.scopes(), vec!["kcm", "kded", "plasmoid"]);
    }

    #[test]
    fn test_header_len_counts_chars() {
        let msg = ParsedCommit::parse("fix: naïve").unwrap();
        assert_eq!(msg.header_len(), 10);
    }

    #[test]
    fn test_clean_message_trims_blank_lines() {
        assert_eq!(clean_message("\n\nfix: x  \n\n"), "fix: x");
        assert_eq!(normalize_message("\nfix: x  \n\n# kept\n"), "fix: x\n\n# kept");
    }
}
