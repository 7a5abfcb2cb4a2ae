// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Default configuration values.

use super::schema::LintConfig;

/// Get the default configuration.
pub fn default_config() -> LintConfig {
    LintConfig::default()
}

/// Generate an example configuration file.
///
/// The rule table spells out the built-in defaults so it can be edited in
/// place.
pub fn example_config() -> &'static str {
    r#"# convlint configuration
#
# Each rule is [severity, applicability, value]:
#   severity      0 = disabled, 1 = warning, 2 = error
#   applicability "always" (condition must hold) or "never" (must not hold)

[rules]
body-leading-blank = [2, "always"]
body-max-line-length = [1, "always", 80]
footer-leading-blank = [2, "always"]
header-max-length = [2, "always", 80]
scope-case = [2, "always", "lower-case"]
scope-enum = [2, "always", ["kcm", "kded", "plasmoid"]]
subject-case = [2, "never", ["sentence-case", "start-case", "pascal-case", "upper-case"]]
subject-empty = [2, "never"]
subject-full-stop = [2, "never", "."]
type-case = [2, "always", "lower-case"]
type-empty = [2, "never"]
type-enum = [2, "always", [
    "build",
    "ci",
    "docs",
    "feat",
    "fix",
    "l10n",
    "perf",
    "refactor",
    "revert",
    "style",
    "test",
]]

# Messages that are not linted at all
[ignores]
defaults = true
patterns = []

[output]
color = true
# help_url = "https://www.conventionalcommits.org/"
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        let header = config.rules.header_max_length.unwrap();
        assert_eq!(header.value, Some(80));
        assert!(config.ignores.defaults);
    }

    #[test]
    fn test_example_config_matches_defaults() {
        let example = crate::config::parse_config(example_config())
            .expect("Example config should parse");
        assert_eq!(example, default_config());
    }
}
