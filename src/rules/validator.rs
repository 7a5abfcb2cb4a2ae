// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Violation and lint result types.

use crate::cli::args::OutputFormat;
use crate::config::Severity;
use console::{style, Style};
use std::fmt;

/// Rule identifiers, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleName {
    TypeEmpty,
    TypeCase,
    TypeEnum,
    ScopeCase,
    ScopeEnum,
    SubjectEmpty,
    SubjectCase,
    SubjectFullStop,
    HeaderMaxLength,
    BodyLeadingBlank,
    BodyMaxLineLength,
    FooterLeadingBlank,
}

impl RuleName {
    /// Every rule, in the order they are evaluated.
    pub const ALL: [RuleName; 12] = [
        RuleName::TypeEmpty,
        RuleName::TypeCase,
        RuleName::TypeEnum,
        RuleName::ScopeCase,
        RuleName::ScopeEnum,
        RuleName::SubjectEmpty,
        RuleName::SubjectCase,
        RuleName::SubjectFullStop,
        RuleName::HeaderMaxLength,
        RuleName::BodyLeadingBlank,
        RuleName::BodyMaxLineLength,
        RuleName::FooterLeadingBlank,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleName::TypeEmpty => "type-empty",
            RuleName::TypeCase => "type-case",
            RuleName::TypeEnum => "type-enum",
            RuleName::ScopeCase => "scope-case",
            RuleName::ScopeEnum => "scope-enum",
            RuleName::SubjectEmpty => "subject-empty",
            RuleName::SubjectCase => "subject-case",
            RuleName::SubjectFullStop => "subject-full-stop",
            RuleName::HeaderMaxLength => "header-max-length",
            RuleName::BodyLeadingBlank => "body-leading-blank",
            RuleName::BodyMaxLineLength => "body-max-line-length",
            RuleName::FooterLeadingBlank => "footer-leading-blank",
        }
    }
}

impl fmt::Display for RuleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RuleName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RuleName::ALL
            .into_iter()
            .find(|rule| rule.as_str() == s)
            .ok_or(())
    }
}

/// The part of a commit message a violation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Type,
    Scope,
    Subject,
    Header,
    Body,
    Footer,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Type => "type",
            Field::Scope => "scope",
            Field::Subject => "subject",
            Field::Header => "header",
            Field::Body => "body",
            Field::Footer => "footer",
        }
    }
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Which rule failed.
    pub rule: RuleName,
    /// Severity configured for the rule; never `Disabled`.
    pub severity: Severity,
    /// Human-readable message.
    pub message: String,
    /// Field the rule inspects.
    pub field: Field,
    /// 1-based line number in the message.
    pub line: Option<usize>,
}

impl Violation {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Format the violation for terminal output.
    pub fn format(&self) -> String {
        let (prefix, code_style) = if self.is_error() {
            (style("✗").red().bold(), Style::new().red())
        } else {
            (style("⚠").yellow().bold(), Style::new().yellow())
        };

        let mut output = format!(
            "{} {} {}",
            prefix,
            self.message,
            code_style.apply_to(format!("[{}]", self.rule))
        );

        if let Some(line) = self.line {
            output.push_str(&format!(" {}", style(format!("(line {})", line)).dim()));
        }

        output
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "rule": self.rule.as_str(),
            "severity": self.severity.as_str(),
            "level": self.severity.level(),
            "field": self.field.as_str(),
            "message": self.message,
            "line": self.line,
        })
    }
}

/// Result of linting one commit message.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// The original message.
    pub message: String,
    /// Commit SHA if linting an existing commit.
    pub commit_sha: Option<String>,
    /// Violations in rule evaluation order.
    pub violations: Vec<Violation>,
    /// Set when the message could not be parsed at all.
    pub parse_error: Option<String>,
    /// Set when the message matched an ignore pattern and was not linted.
    pub ignored: bool,
}

impl ValidationResult {
    /// Create a new, empty result.
    pub fn new(message: String) -> Self {
        Self {
            message,
            commit_sha: None,
            violations: Vec::new(),
            parse_error: None,
            ignored: false,
        }
    }

    /// Check if the lint passed (no errors, message parsed).
    pub fn is_valid(&self) -> bool {
        self.parse_error.is_none() && !self.violations.iter().any(Violation::is_error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| v.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(|v| !v.is_error())
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// The first line of the original message.
    pub fn header(&self) -> &str {
        self.message
            .lines()
            .find(|line| !line.trim().is_empty() && !line.starts_with('#'))
            .unwrap_or("")
    }

    /// Print the result to stdout.
    pub fn print(&self, format: OutputFormat, help_url: Option<&str>) {
        match format {
            OutputFormat::Json => println!("{}", self.to_json()),
            OutputFormat::Text => self.print_text(help_url),
        }
    }

    fn print_text(&self, help_url: Option<&str>) {
        let status = if self.ignored {
            style("-").dim()
        } else if self.is_valid() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };

        match self.commit_sha {
            Some(ref sha) => {
                let short_sha = &sha[..7.min(sha.len())];
                println!("{} {} {}", status, style(short_sha).cyan(), self.header());
            }
            None => println!("{} {}", status, self.header()),
        }

        if self.ignored {
            println!("  {}", style("ignored").dim());
            return;
        }

        if let Some(ref error) = self.parse_error {
            println!("  {} {}", style("✗").red().bold(), error);
        }

        for violation in &self.violations {
            println!("  {}", violation.format());
        }

        if !self.violations.is_empty() || self.parse_error.is_some() {
            println!("  {}", style(self.summary()).dim());
            if let Some(url) = help_url {
                println!("  {} {}", style("ⓘ Get help:").dim(), url);
            }
        }
    }

    /// Machine-readable record for this result.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "valid": self.is_valid(),
            "ignored": self.ignored,
            "commit": self.commit_sha,
            "header": self.header(),
            "parse_error": self.parse_error,
            "errors": self.error_count(),
            "warnings": self.warning_count(),
            "violations": self.violations.iter().map(Violation::to_json).collect::<Vec<_>>(),
        })
    }

    /// Get a summary string.
    pub fn summary(&self) -> String {
        if self.ignored {
            "Ignored".to_string()
        } else if self.parse_error.is_some() {
            "Invalid (unparseable header)".to_string()
        } else if self.is_valid() {
            match self.warning_count() {
                0 => "Valid".to_string(),
                n => format!("Valid ({} warnings)", n),
            }
        } else {
            format!(
                "Invalid ({} errors, {} warnings)",
                self.error_count(),
                self.warning_count()
            )
        }
    }
}
