// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! convlint - Conventional commit message linter
//!
//! Parses commit messages into type, scope, subject, body and footer and
//! checks them against a commitlint-style rule table.
//!
//! # Features
//!
//! - **Parser**: Conventional commit header, body and footer detection
//! - **Rule Engine**: Twelve configurable rules with severity and applicability
//! - **Ignores**: Merge, revert and fixup messages are skipped by default
//! - **Git Integration**: Lint single commits or whole ranges of history
//!
//! # Example
//!
//! ```
//! use convlint::commit::ParsedCommit;
//! use convlint::config::LintConfig;
//! use convlint::rules::validate;
//!
//! let commit = ParsedCommit::parse("feat(kcm): add new toggle").unwrap();
//! let violations = validate(&commit, &LintConfig::default().rules);
//! assert!(violations.is_empty());
//! ```

// Module declarations
pub mod cli;
pub mod commit;
pub mod config;
pub mod error;
pub mod git;
pub mod rules;

// Re-exports for convenience
pub use commit::ParsedCommit;
pub use config::LintConfig;
pub use error::{LintError, Result};
pub use rules::{validate, RuleEngine, Violation};

/// Version information embedded at compile time.
pub mod version {
    /// The current version of convlint.
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");

    /// The git SHA at compile time (if available).
    pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");

    /// The git commit date at compile time (if available).
    pub const GIT_COMMIT_DATE: Option<&str> = option_env!("VERGEN_GIT_COMMIT_DATE");

    /// Get a formatted version string.
    pub fn version_string() -> String {
        match (GIT_SHA, GIT_COMMIT_DATE) {
            (Some(sha), Some(date)) => {
                format!("{} ({} {})", VERSION, &sha[..7.min(sha.len())], date)
            }
            (Some(sha), None) => {
                format!("{} ({})", VERSION, &sha[..7.min(sha.len())])
            }
            _ => VERSION.to_string(),
        }
    }
}
