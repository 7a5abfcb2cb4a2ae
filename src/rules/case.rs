// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Case style classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A casing style a piece of text can be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CaseStyle {
    /// `add new toggle`
    LowerCase,
    /// `ADD NEW TOGGLE`
    UpperCase,
    /// `addNewToggle`
    CamelCase,
    /// `add-new-toggle`
    KebabCase,
    /// `AddNewToggle`
    PascalCase,
    /// `Add new toggle`
    SentenceCase,
    /// `add_new_toggle`
    SnakeCase,
    /// `Add New Toggle`
    StartCase,
}

impl CaseStyle {
    /// Classification order used by [`classify_case`].
    pub const PRECEDENCE: [CaseStyle; 8] = [
        CaseStyle::LowerCase,
        CaseStyle::UpperCase,
        CaseStyle::StartCase,
        CaseStyle::SentenceCase,
        CaseStyle::PascalCase,
        CaseStyle::CamelCase,
        CaseStyle::KebabCase,
        CaseStyle::SnakeCase,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CaseStyle::LowerCase => "lower-case",
            CaseStyle::UpperCase => "upper-case",
            CaseStyle::CamelCase => "camel-case",
            CaseStyle::KebabCase => "kebab-case",
            CaseStyle::PascalCase => "pascal-case",
            CaseStyle::SentenceCase => "sentence-case",
            CaseStyle::SnakeCase => "snake-case",
            CaseStyle::StartCase => "start-case",
        }
    }

    /// Whether `text` is written in this style.
    ///
    /// Text without any letters only counts as lower-case.
    pub fn matches(&self, text: &str) -> bool {
        let has_alpha = text.chars().any(char::is_alphabetic);
        let has_upper = text.chars().any(char::is_uppercase);
        let has_lower = text.chars().any(char::is_lowercase);

        if !has_alpha {
            return *self == CaseStyle::LowerCase;
        }

        match self {
            CaseStyle::LowerCase => !has_upper,
            CaseStyle::UpperCase => !has_lower,
            CaseStyle::CamelCase => {
                starts_with(text, char::is_lowercase) && text.chars().all(char::is_alphanumeric)
            }
            CaseStyle::PascalCase => {
                starts_with(text, char::is_uppercase)
                    && text.chars().all(char::is_alphanumeric)
                    && (has_lower || text.chars().count() == 1)
            }
            CaseStyle::KebabCase => is_delimited(text, '-'),
            CaseStyle::SnakeCase => is_delimited(text, '_'),
            CaseStyle::SentenceCase => {
                let mut chars = text.chars();
                chars.next().is_some_and(char::is_uppercase) && !chars.any(char::is_uppercase)
            }
            CaseStyle::StartCase => text
                .split_whitespace()
                .all(|word| starts_with(word, char::is_uppercase)),
        }
    }
}

impl fmt::Display for CaseStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn starts_with(text: &str, pred: impl Fn(char) -> bool) -> bool {
    text.chars().next().is_some_and(pred)
}

/// Lower-case alphanumeric segments joined by `delimiter`.
fn is_delimited(text: &str, delimiter: char) -> bool {
    text.split(delimiter).all(|segment| {
        !segment.is_empty()
            && segment
                .chars()
                .all(|c| c.is_alphanumeric() && !c.is_uppercase())
    })
}

/// The most telling style `word` is written in, if any.
pub fn classify_case(word: &str) -> Option<CaseStyle> {
    CaseStyle::PRECEDENCE
        .into_iter()
        .find(|style| style.matches(word))
}

/// Join styles for messages: `sentence-case, start-case`.
pub(crate) fn describe_styles(styles: &[CaseStyle]) -> String {
    styles
        .iter()
        .map(CaseStyle::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_case() {
        assert!(CaseStyle::LowerCase.matches("feat"));
        assert!(CaseStyle::LowerCase.matches("unknown-scope"));
        assert!(CaseStyle::LowerCase.matches("123"));
        assert!(!CaseStyle::LowerCase.matches("Feat"));
    }

    #[test]
    fn test_upper_case() {
        assert!(CaseStyle::UpperCase.matches("ADD"));
        assert!(CaseStyle::UpperCase.matches("API2"));
        assert!(!CaseStyle::UpperCase.matches("Add"));
        assert!(!CaseStyle::UpperCase.matches("42"));
    }

    #[test]
    fn test_sentence_start_pascal() {
        assert!(CaseStyle::SentenceCase.matches("Add"));
        assert!(CaseStyle::StartCase.matches("Add"));
        assert!(CaseStyle::PascalCase.matches("Add"));

        assert!(CaseStyle::SentenceCase.matches("Add new toggle"));
        assert!(!CaseStyle::StartCase.matches("Add new toggle"));
        assert!(CaseStyle::StartCase.matches("Add New Toggle"));
        assert!(!CaseStyle::SentenceCase.matches("Add New Toggle"));

        assert!(CaseStyle::PascalCase.matches("AddToggle"));
        assert!(!CaseStyle::PascalCase.matches("ADD"));
        assert!(!CaseStyle::PascalCase.matches("add"));
    }

    #[test]
    fn test_camel_kebab_snake() {
        assert!(CaseStyle::CamelCase.matches("addToggle"));
        assert!(!CaseStyle::CamelCase.matches("add-toggle"));

        assert!(CaseStyle::KebabCase.matches("add-toggle"));
        assert!(!CaseStyle::KebabCase.matches("add--toggle"));
        assert!(!CaseStyle::KebabCase.matches("Add-toggle"));

        assert!(CaseStyle::SnakeCase.matches("add_toggle"));
        assert!(!CaseStyle::SnakeCase.matches("add_"));
    }

    #[test]
    fn test_classify_case() {
        assert_eq!(classify_case("add"), Some(CaseStyle::LowerCase));
        assert_eq!(classify_case("ADD"), Some(CaseStyle::UpperCase));
        assert_eq!(classify_case("Add"), Some(CaseStyle::StartCase));
        assert_eq!(classify_case("AddToggle"), Some(CaseStyle::StartCase));
        assert_eq!(classify_case("addToggle"), Some(CaseStyle::CamelCase));
        assert_eq!(classify_case("add-Toggle"), None);
    }

    #[test]
    fn test_serde_names() {
        let style: CaseStyle = serde_json::from_str("\"sentence-case\"").unwrap();
        assert_eq!(style, CaseStyle::SentenceCase);
        assert_eq!(
            serde_json::to_string(&CaseStyle::PascalCase).unwrap(),
            "\"pascal-case\""
        );
        for style in CaseStyle::PRECEDENCE {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style.as_str()));
        }
    }
}
