// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Configuration schema definitions.
//!
//! Rules are written the way commitlint writes them, as positional arrays
//! `[severity, applicability, value]`, but land in a typed [`RulesConfig`]
//! with one field per known rule. Shape errors are caught by serde and
//! value errors by [`RulesConfig::validate`], both at load time.

use serde::de::{self, Deserializer, SeqAccess, Unexpected, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use crate::error::ConfigError;
use crate::rules::CaseStyle;

/// The main configuration structure for convlint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct LintConfig {
    /// Rule table.
    pub rules: RulesConfig,

    /// Messages that are skipped instead of linted.
    pub ignores: IgnoreConfig,

    /// Report rendering.
    pub output: OutputConfig,
}

impl LintConfig {
    /// Load configuration from the default locations.
    pub fn load() -> crate::error::Result<Self> {
        super::loader::load_config()
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &std::path::Path) -> crate::error::Result<Self> {
        super::loader::load_config_from(path)
    }

    /// Check every value that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.rules.validate()?;
        self.ignores.validate()
    }
}

/// How a failed rule is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// The rule is not evaluated.
    Disabled,
    /// Reported, but does not fail the lint.
    Warning,
    /// Reported and fails the lint.
    Error,
}

impl Severity {
    /// Numeric level as used in config files.
    pub fn level(&self) -> u8 {
        match self {
            Severity::Disabled => 0,
            Severity::Warning => 1,
            Severity::Error => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Disabled => "disabled",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Severity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.level())
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeverityVisitor;

        impl<'de> Visitor<'de> for SeverityVisitor {
            type Value = Severity;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a severity: 0, 1, 2, \"disabled\", \"warning\" or \"error\"")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Severity, E> {
                match v {
                    0 => Ok(Severity::Disabled),
                    1 => Ok(Severity::Warning),
                    2 => Ok(Severity::Error),
                    _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Severity, E> {
                match v {
                    0 => Ok(Severity::Disabled),
                    1 => Ok(Severity::Warning),
                    2 => Ok(Severity::Error),
                    _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Severity, E> {
                match v {
                    "disabled" | "off" => Ok(Severity::Disabled),
                    "warning" | "warn" => Ok(Severity::Warning),
                    "error" => Ok(Severity::Error),
                    _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(SeverityVisitor)
    }
}

/// Whether a rule's condition must hold or must not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Applicability {
    #[default]
    Always,
    Never,
}

impl Applicability {
    /// Whether a rule passes given whether its condition holds.
    pub fn passes(&self, holds: bool) -> bool {
        match self {
            Applicability::Always => holds,
            Applicability::Never => !holds,
        }
    }

    /// "must" or "must not", for violation messages.
    pub fn verb(&self) -> &'static str {
        match self {
            Applicability::Always => "must",
            Applicability::Never => "must not",
        }
    }
}

/// One configured rule: `[severity, applicability, value]`.
///
/// Applicability defaults to `always` and the value is optional, so
/// `[2]`, `[2, "never"]` and `[1, "always", 80]` are all accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSetting<P> {
    pub severity: Severity,
    pub applicability: Applicability,
    pub value: Option<P>,
}

impl<P> RuleSetting<P> {
    /// A rule with a parameter.
    pub fn new(severity: Severity, applicability: Applicability, value: P) -> Self {
        Self {
            severity,
            applicability,
            value: Some(value),
        }
    }

    /// A rule without a parameter.
    pub fn bare(severity: Severity, applicability: Applicability) -> Self {
        Self {
            severity,
            applicability,
            value: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.severity != Severity::Disabled
    }
}

impl<P: Serialize> Serialize for RuleSetting<P> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.value.is_some() { 3 } else { 2 };
        let mut seq = serializer.serialize_seq(Some(len))?;
        seq.serialize_element(&self.severity)?;
        seq.serialize_element(&self.applicability)?;
        if let Some(ref value) = self.value {
            seq.serialize_element(value)?;
        }
        seq.end()
    }
}

impl<'de, P: Deserialize<'de>> Deserialize<'de> for RuleSetting<P> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SettingVisitor<P>(PhantomData<P>);

        impl<'de, P: Deserialize<'de>> Visitor<'de> for SettingVisitor<P> {
            type Value = RuleSetting<P>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an array of [severity, applicability?, value?]")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let severity = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let applicability = seq.next_element()?.unwrap_or_default();
                let value = seq.next_element()?;

                if seq.next_element::<de::IgnoredAny>()?.is_some() {
                    return Err(de::Error::invalid_length(4, &self));
                }

                Ok(RuleSetting {
                    severity,
                    applicability,
                    value,
                })
            }
        }

        deserializer.deserialize_seq(SettingVisitor(PhantomData))
    }
}

/// Case styles a case rule compares against: one style or a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CaseTarget {
    Single(CaseStyle),
    Any(Vec<CaseStyle>),
}

impl CaseTarget {
    pub fn styles(&self) -> &[CaseStyle] {
        match self {
            CaseTarget::Single(style) => std::slice::from_ref(style),
            CaseTarget::Any(styles) => styles,
        }
    }
}

impl From<CaseStyle> for CaseTarget {
    fn from(style: CaseStyle) -> Self {
        CaseTarget::Single(style)
    }
}

/// The rule table. Each field is keyed by its rule identifier.
///
/// Rules left out of a config file keep their default setting; a rule is
/// switched off with severity `0`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RulesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_empty: Option<RuleSetting<()>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_case: Option<RuleSetting<CaseTarget>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_enum: Option<RuleSetting<Vec<String>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_case: Option<RuleSetting<CaseTarget>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_enum: Option<RuleSetting<Vec<String>>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_empty: Option<RuleSetting<()>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_case: Option<RuleSetting<CaseTarget>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject_full_stop: Option<RuleSetting<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub header_max_length: Option<RuleSetting<usize>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_leading_blank: Option<RuleSetting<()>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_max_line_length: Option<RuleSetting<usize>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_leading_blank: Option<RuleSetting<()>>,
}

/// Default full-stop character for `subject-full-stop`.
pub const DEFAULT_FULL_STOP: &str = ".";

/// Default line limit for `body-max-line-length`.
pub const DEFAULT_BODY_LINE_LENGTH: usize = 80;

/// Default limit for `header-max-length`.
pub const DEFAULT_HEADER_LENGTH: usize = 80;

impl Default for RulesConfig {
    fn default() -> Self {
        use Applicability::{Always, Never};
        use Severity::{Error, Warning};

        Self {
            type_empty: Some(RuleSetting::bare(Error, Never)),
            type_case: Some(RuleSetting::new(Error, Always, CaseStyle::LowerCase.into())),
            type_enum: Some(RuleSetting::new(
                Error,
                Always,
                to_strings(&[
                    "build", "ci", "docs", "feat", "fix", "l10n", "perf", "refactor", "revert",
                    "style", "test",
                ]),
            )),
            scope_case: Some(RuleSetting::new(Error, Always, CaseStyle::LowerCase.into())),
            scope_enum: Some(RuleSetting::new(
                Error,
                Always,
                to_strings(&["kcm", "kded", "plasmoid"]),
            )),
            subject_empty: Some(RuleSetting::bare(Error, Never)),
            subject_case: Some(RuleSetting::new(
                Error,
                Never,
                CaseTarget::Any(vec![
                    CaseStyle::SentenceCase,
                    CaseStyle::StartCase,
                    CaseStyle::PascalCase,
                    CaseStyle::UpperCase,
                ]),
            )),
            subject_full_stop: Some(RuleSetting::new(
                Error,
                Never,
                DEFAULT_FULL_STOP.to_string(),
            )),
            header_max_length: Some(RuleSetting::new(Error, Always, DEFAULT_HEADER_LENGTH)),
            body_leading_blank: Some(RuleSetting::bare(Error, Always)),
            body_max_line_length: Some(RuleSetting::new(
                Warning,
                Always,
                DEFAULT_BODY_LINE_LENGTH,
            )),
            footer_leading_blank: Some(RuleSetting::bare(Error, Always)),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

impl RulesConfig {
    /// A table with every rule absent.
    pub fn empty() -> Self {
        Self {
            type_empty: None,
            type_case: None,
            type_enum: None,
            scope_case: None,
            scope_enum: None,
            subject_empty: None,
            subject_case: None,
            subject_full_stop: None,
            header_max_length: None,
            body_leading_blank: None,
            body_max_line_length: None,
            footer_leading_blank: None,
        }
    }

    /// Reject enabled rules whose parameters cannot be evaluated.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_case("type-case", &self.type_case)?;
        validate_enum("type-enum", &self.type_enum)?;
        validate_case("scope-case", &self.scope_case)?;
        validate_enum("scope-enum", &self.scope_enum)?;
        validate_case("subject-case", &self.subject_case)?;

        if let Some(stop) = enabled_value("subject-full-stop", &self.subject_full_stop, false)? {
            if stop.is_empty() {
                return Err(invalid("subject-full-stop", "full stop must not be empty"));
            }
        }

        validate_limit("header-max-length", &self.header_max_length)?;
        validate_limit("body-max-line-length", &self.body_max_line_length)?;

        Ok(())
    }
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        message: message.into(),
    }
}

/// The parameter of an enabled rule, or `None` when the rule is off.
fn enabled_value<'a, P>(
    key: &str,
    setting: &'a Option<RuleSetting<P>>,
    required: bool,
) -> Result<Option<&'a P>, ConfigError> {
    match setting {
        Some(rule) if rule.is_enabled() => match rule.value {
            Some(ref value) => Ok(Some(value)),
            None if required => Err(invalid(key, "rule is enabled but has no value")),
            None => Ok(None),
        },
        _ => Ok(None),
    }
}

fn validate_case(key: &str, setting: &Option<RuleSetting<CaseTarget>>) -> Result<(), ConfigError> {
    if let Some(target) = enabled_value(key, setting, true)? {
        if target.styles().is_empty() {
            return Err(invalid(key, "at least one case style is required"));
        }
    }
    Ok(())
}

fn validate_enum(key: &str, setting: &Option<RuleSetting<Vec<String>>>) -> Result<(), ConfigError> {
    if let Some(values) = enabled_value(key, setting, true)? {
        if values.is_empty() {
            return Err(invalid(key, "allowed values must not be empty"));
        }
        for value in values {
            if value.is_empty() {
                return Err(invalid(key, "allowed values must not contain empty strings"));
            }
            if value.to_lowercase() != *value {
                return Err(invalid(key, format!("'{}' must be lower-case", value)));
            }
        }
    }
    Ok(())
}

fn validate_limit(key: &str, setting: &Option<RuleSetting<usize>>) -> Result<(), ConfigError> {
    if let Some(&limit) = enabled_value(key, setting, true)? {
        if limit == 0 {
            return Err(invalid(key, "limit must be greater than zero"));
        }
    }
    Ok(())
}

/// Ignore configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IgnoreConfig {
    /// Skip merge, revert, fixup and release commits.
    pub defaults: bool,

    /// Extra regexes; a message matching any of them is skipped.
    pub patterns: Vec<String>,
}

impl Default for IgnoreConfig {
    fn default() -> Self {
        Self {
            defaults: true,
            patterns: Vec::new(),
        }
    }
}

impl IgnoreConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for pattern in &self.patterns {
            regex::Regex::new(pattern)
                .map_err(|e| invalid("ignores.patterns", format!("'{}': {}", pattern, e)))?;
        }
        Ok(())
    }
}

/// Output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Whether to use colors.
    pub color: bool,

    /// Link printed under failing reports.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_url: Option<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            help_url: None,
        }
    }
}
