// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Built-in validation rules.
//!
//! Every rule states a condition. With applicability `always` the condition
//! must hold and with `never` it must not. Rules that are absent or
//! disabled are skipped, and rules whose input is missing (no scope, no
//! body) pass.

use crate::commit::ParsedCommit;
use crate::config::{CaseTarget, RuleSetting, RulesConfig, DEFAULT_FULL_STOP};

use super::case::describe_styles;
use super::validator::{Field, RuleName, Violation};

/// Evaluate every enabled rule against a parsed commit.
///
/// The result is ordered by [`RuleName::ALL`]; per-line rules report their
/// lines top to bottom.
pub fn validate(commit: &ParsedCommit, rules: &RulesConfig) -> Vec<Violation> {
    let mut violations = Vec::new();

    // Type rules
    violations.extend(check_type_empty(commit, rules.type_empty.as_ref()));
    violations.extend(check_type_case(commit, rules.type_case.as_ref()));
    violations.extend(check_type_enum(commit, rules.type_enum.as_ref()));

    // Scope rules
    violations.extend(check_scope_case(commit, rules.scope_case.as_ref()));
    violations.extend(check_scope_enum(commit, rules.scope_enum.as_ref()));

    // Subject and header rules
    violations.extend(check_subject_empty(commit, rules.subject_empty.as_ref()));
    violations.extend(check_subject_case(commit, rules.subject_case.as_ref()));
    violations.extend(check_subject_full_stop(
        commit,
        rules.subject_full_stop.as_ref(),
    ));
    violations.extend(check_header_max_length(
        commit,
        rules.header_max_length.as_ref(),
    ));

    // Body and footer rules
    violations.extend(check_body_leading_blank(
        commit,
        rules.body_leading_blank.as_ref(),
    ));
    violations.extend(check_body_max_line_length(
        commit,
        rules.body_max_line_length.as_ref(),
    ));
    violations.extend(check_footer_leading_blank(
        commit,
        rules.footer_leading_blank.as_ref(),
    ));

    tracing::debug!(
        "{} violation(s) for header {:?}",
        violations.len(),
        commit.header
    );

    violations
}

fn enabled<P>(setting: Option<&RuleSetting<P>>) -> Option<&RuleSetting<P>> {
    setting.filter(|s| s.is_enabled())
}

/// Turn a rule condition into a violation when the applicability rejects it.
fn evaluate<P>(
    rule: RuleName,
    field: Field,
    line: Option<usize>,
    setting: &RuleSetting<P>,
    holds: bool,
    describe: impl FnOnce(&str) -> String,
) -> Option<Violation> {
    if setting.applicability.passes(holds) {
        return None;
    }

    Some(Violation {
        rule,
        severity: setting.severity,
        message: describe(setting.applicability.verb()),
        field,
        line,
    })
}

fn matches_case(text: &str, target: &CaseTarget) -> bool {
    target.styles().iter().any(|style| style.matches(text))
}

fn check_type_empty(commit: &ParsedCommit, setting: Option<&RuleSetting<()>>) -> Option<Violation> {
    let setting = enabled(setting)?;
    let holds = commit.commit_type.is_empty();

    evaluate(RuleName::TypeEmpty, Field::Type, Some(1), setting, holds, |verb| {
        format!("type {} be empty", verb)
    })
}

fn check_type_case(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<CaseTarget>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let target = setting.value.as_ref()?;
    if commit.commit_type.is_empty() {
        return None;
    }
    let holds = matches_case(&commit.commit_type, target);

    evaluate(RuleName::TypeCase, Field::Type, Some(1), setting, holds, |verb| {
        format!("type {} be {}", verb, describe_styles(target.styles()))
    })
}

fn check_type_enum(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<Vec<String>>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let allowed = setting.value.as_ref()?;
    if commit.commit_type.is_empty() {
        return None;
    }
    let holds = allowed.iter().any(|t| *t == commit.commit_type);

    evaluate(RuleName::TypeEnum, Field::Type, Some(1), setting, holds, |verb| {
        format!(
            "type '{}' {} be one of [{}]",
            commit.commit_type,
            verb,
            allowed.join(", ")
        )
    })
}

fn check_scope_case(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<CaseTarget>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let target = setting.value.as_ref()?;
    let scope = commit.scope.as_deref().filter(|s| !s.is_empty())?;
    let holds = matches_case(scope, target);

    evaluate(RuleName::ScopeCase, Field::Scope, Some(1), setting, holds, |verb| {
        format!("scope {} be {}", verb, describe_styles(target.styles()))
    })
}

fn check_scope_enum(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<Vec<String>>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let allowed = setting.value.as_ref()?;
    let scopes = commit.scopes();
    if scopes.is_empty() {
        return None;
    }
    let holds = scopes
        .iter()
        .all(|scope| allowed.iter().any(|a| a == scope));

    evaluate(RuleName::ScopeEnum, Field::Scope, Some(1), setting, holds, |verb| {
        format!(
            "scope '{}' {} be one of [{}]",
            commit.scope.as_deref().unwrap_or_default(),
            verb,
            allowed.join(", ")
        )
    })
}

fn check_subject_empty(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<()>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let holds = commit.subject.trim().is_empty();

    evaluate(
        RuleName::SubjectEmpty,
        Field::Subject,
        Some(1),
        setting,
        holds,
        |verb| format!("subject {} be empty", verb),
    )
}

fn check_subject_case(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<CaseTarget>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let target = setting.value.as_ref()?;
    let word = commit.subject_first_word()?;
    let holds = matches_case(word, target);

    evaluate(
        RuleName::SubjectCase,
        Field::Subject,
        Some(1),
        setting,
        holds,
        |verb| {
            format!(
                "subject {} be {} (first word '{}')",
                verb,
                describe_styles(target.styles()),
                word
            )
        },
    )
}

fn check_subject_full_stop(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<String>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let stop = setting.value.as_deref().unwrap_or(DEFAULT_FULL_STOP);
    if commit.subject.is_empty() {
        return None;
    }
    let holds = commit.subject.ends_with(stop);

    evaluate(
        RuleName::SubjectFullStop,
        Field::Subject,
        Some(1),
        setting,
        holds,
        |verb| format!("subject {} end with '{}'", verb, stop),
    )
}

fn check_header_max_length(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<usize>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let max = *setting.value.as_ref()?;
    let len = commit.header_len();
    let holds = len <= max;

    evaluate(
        RuleName::HeaderMaxLength,
        Field::Header,
        Some(1),
        setting,
        holds,
        |verb| {
            format!(
                "header {} be at most {} characters, current length is {}",
                verb, max, len
            )
        },
    )
}

fn check_body_leading_blank(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<()>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let start = commit.body_line?;
    let holds = commit.is_preceded_by_blank(start);

    evaluate(
        RuleName::BodyLeadingBlank,
        Field::Body,
        Some(start + 1),
        setting,
        holds,
        |verb| format!("body {} have a leading blank line", verb),
    )
}

fn check_body_max_line_length(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<usize>>,
) -> Vec<Violation> {
    let Some(setting) = enabled(setting) else {
        return Vec::new();
    };
    let Some(&max) = setting.value.as_ref() else {
        return Vec::new();
    };

    commit
        .body_lines()
        .into_iter()
        .filter_map(|(line_no, line)| {
            let len = line.chars().count();
            evaluate(
                RuleName::BodyMaxLineLength,
                Field::Body,
                Some(line_no),
                setting,
                len <= max,
                |verb| {
                    format!(
                        "body line {} be at most {} characters, current length is {}",
                        verb, max, len
                    )
                },
            )
        })
        .collect()
}

fn check_footer_leading_blank(
    commit: &ParsedCommit,
    setting: Option<&RuleSetting<()>>,
) -> Option<Violation> {
    let setting = enabled(setting)?;
    let start = commit.footer_line?;
    let holds = commit.is_preceded_by_blank(start);

    evaluate(
        RuleName::FooterLeadingBlank,
        Field::Footer,
        Some(start + 1),
        setting,
        holds,
        |verb| format!("footer {} have a leading blank line", verb),
    )
}
