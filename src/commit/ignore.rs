// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Messages that are skipped instead of linted.

use crate::config::IgnoreConfig;
use crate::error::{ConfigError, Result};
use lazy_static::lazy_static;
use regex::Regex;

use super::message::clean_message;

lazy_static! {
    /// Headers produced by tools rather than people.
    static ref DEFAULT_IGNORES: Vec<Regex> = [
        r"^Merge (pull request|branch|remote-tracking branch|tag) ",
        r"^Merge .+ of .+",
        r"^Merged .+ (in|into) .+",
        r"^Merged PR .+: ",
        r"^Automatic merge",
        r"^Auto-merged .+ into ",
        r"^[Rr]evert ",
        r"^(amend|fixup|squash)! ",
        r"^v?\d+\.\d+\.\d+(-[0-9A-Za-z.-]+)?(\+[0-9A-Za-z.-]+)?$",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).unwrap())
    .collect();
}

/// Whether the header of a message matches one of the built-in ignores.
pub fn is_default_ignored(message: &str) -> bool {
    let cleaned = clean_message(message);
    let header = cleaned.lines().next().unwrap_or("");
    DEFAULT_IGNORES.iter().any(|re| re.is_match(header))
}

/// Compiled ignore rules.
#[derive(Debug, Clone)]
pub struct IgnoreMatcher {
    defaults: bool,
    patterns: Vec<Regex>,
}

impl IgnoreMatcher {
    /// Compile the configured patterns.
    pub fn new(config: &IgnoreConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|pattern| {
                Regex::new(pattern).map_err(|e| ConfigError::InvalidValue {
                    key: "ignores.patterns".to_string(),
                    message: format!("'{}': {}", pattern, e),
                })
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            defaults: config.defaults,
            patterns,
        })
    }

    /// Whether a raw message should be skipped.
    pub fn is_ignored(&self, message: &str) -> bool {
        if self.defaults && is_default_ignored(message) {
            return true;
        }

        let cleaned = clean_message(message);
        self.patterns.iter().any(|re| re.is_match(&cleaned))
    }
}
