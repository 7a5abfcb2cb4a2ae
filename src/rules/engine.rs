// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Rule engine for commit linting.

use crate::commit::{IgnoreMatcher, ParsedCommit};
use crate::config::LintConfig;
use crate::error::Result;
use crate::git::{self, Repository};

use super::builtin::validate;
use super::validator::{ValidationResult, Violation};

/// Lints raw commit messages against a fixed configuration.
///
/// The engine holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    config: LintConfig,
    ignores: IgnoreMatcher,
}

impl RuleEngine {
    /// Create a new rule engine with the given configuration.
    pub fn new(config: LintConfig) -> Result<Self> {
        let ignores = IgnoreMatcher::new(&config.ignores)?;
        Ok(Self { config, ignores })
    }

    pub fn config(&self) -> &LintConfig {
        &self.config
    }

    /// Validate an already parsed commit.
    pub fn validate(&self, commit: &ParsedCommit) -> Vec<Violation> {
        validate(commit, &self.config.rules)
    }

    /// Lint a message as written in an editor or a message file.
    ///
    /// Ignored and unparseable messages still produce a result, so a range
    /// of commits is always reported in full.
    pub fn lint(&self, message: &str) -> ValidationResult {
        self.lint_with(message, ParsedCommit::parse)
    }

    /// Lint a message read from git history, where `#` lines are content.
    pub fn lint_stored(&self, message: &str) -> ValidationResult {
        self.lint_with(message, ParsedCommit::parse_raw)
    }

    fn lint_with(
        &self,
        message: &str,
        parse: fn(&str) -> Result<ParsedCommit>,
    ) -> ValidationResult {
        let mut result = ValidationResult::new(message.to_string());

        if self.ignores.is_ignored(message) {
            tracing::debug!("Ignoring message: {:?}", result.header());
            result.ignored = true;
            return result;
        }

        match parse(message) {
            Ok(commit) => result.violations = self.validate(&commit),
            Err(e) => {
                tracing::debug!("Failed to parse message: {}", e);
                result.parse_error = Some(e.to_string());
            }
        }

        result
    }

    /// Lint a specific commit of the current repository.
    pub fn check_commit(&self, reference: &str) -> Result<ValidationResult> {
        self.check_commit_in(&git::open_repo()?, reference)
    }

    /// Lint every commit of a range in the current repository, newest first.
    pub fn check_range(&self, range: &str) -> Result<Vec<ValidationResult>> {
        self.check_range_in(&git::open_repo()?, range)
    }

    /// Lint a specific commit by reference.
    pub fn check_commit_in(&self, repo: &Repository, reference: &str) -> Result<ValidationResult> {
        let (oid, message) = repo.get_commit_message(reference)?;

        let mut result = self.lint_stored(&message);
        result.commit_sha = Some(oid.to_string());
        Ok(result)
    }

    /// Lint every commit in a range, newest first.
    pub fn check_range_in(&self, repo: &Repository, range: &str) -> Result<Vec<ValidationResult>> {
        let commits = repo.get_commits_in_range(range)?;

        Ok(commits
            .into_iter()
            .map(|(oid, message)| {
                let mut result = self.lint_stored(&message);
                result.commit_sha = Some(oid.to_string());
                result
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IgnoreConfig;
    use crate::rules::RuleName;
    use git2::Signature;
    use tempfile::TempDir;

    /// A repository whose commits are made from `messages`, oldest first.
    fn repo_with_history(messages: &[&str]) -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();

        {
            let sig = Signature::now("Test User", "test@example.com").unwrap();
            let tree_id = repo.index().unwrap().write_tree().unwrap();
            let tree = repo.find_tree(tree_id).unwrap();

            let mut parent: Option<git2::Commit<'_>> = None;
            for message in messages {
                let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();
                let oid = repo
                    .commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
                    .unwrap();
                parent = Some(repo.find_commit(oid).unwrap());
            }
        }

        let wrapper = Repository::open(dir.path()).unwrap();
        (dir, wrapper)
    }

    fn engine() -> RuleEngine {
        RuleEngine::new(LintConfig::default()).unwrap()
    }

    #[test]
    fn test_lint_valid() {
        let result = engine().lint("feat(kcm): add new toggle");
        assert!(result.is_valid());
        assert!(result.violations.is_empty());
        assert!(!result.ignored);
    }

    #[test]
    fn test_lint_collects_all_violations() {
        let result = engine().lint("Feat: Add New Toggle.");
        assert!(!result.is_valid());
        let rules: Vec<RuleName> = result.violations.iter().map(|v| v.rule).collect();
        assert!(rules.contains(&RuleName::TypeCase));
        assert!(rules.contains(&RuleName::SubjectCase));
        assert!(rules.contains(&RuleName::SubjectFullStop));
    }

    #[test]
    fn test_lint_parse_error() {
        let result = engine().lint("just a message");
        assert!(!result.is_valid());
        assert!(result.violations.is_empty());
        assert!(result.parse_error.unwrap().contains("just a message"));
    }

    #[test]
    fn test_lint_ignores_merge_commit() {
        let result = engine().lint("Merge branch 'work/osd' into master");
        assert!(result.ignored);
        assert!(result.is_valid());
    }

    #[test]
    fn test_lint_without_default_ignores() {
        let config = LintConfig {
            ignores: IgnoreConfig {
                defaults: false,
                patterns: Vec::new(),
            },
            ..LintConfig::default()
        };
        let result = RuleEngine::new(config)
            .unwrap()
            .lint("Merge branch 'work/osd' into master");
        assert!(!result.ignored);
        assert!(!result.is_valid());
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        let engine = std::sync::Arc::new(engine());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let engine = std::sync::Arc::clone(&engine);
                std::thread::spawn(move || engine.lint("Feat: Add New Toggle.").violations)
            })
            .collect();

        let expected = engine.lint("Feat: Add New Toggle.").violations;
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    }

    #[test]
    fn test_check_range_reports_every_commit_newest_first() {
        let (_dir, repo) = repo_with_history(&[
            "chore: initial import",
            "feat(kcm): add new toggle",
            "Feat: Add New Toggle.",
            "just a message",
        ]);

        let results = engine().check_range_in(&repo, "HEAD~3..HEAD").unwrap();
        assert_eq!(results.len(), 3);

        let headers: Vec<&str> = results.iter().map(|r| r.header()).collect();
        assert_eq!(
            headers,
            vec!["just a message", "Feat: Add New Toggle.", "feat(kcm): add new toggle"]
        );

        assert!(results[0].parse_error.is_some());
        assert!(!results[0].is_valid());
        assert!(results[1].parse_error.is_none());
        assert_eq!(results[1].error_count(), 4);
        assert!(results[2].is_valid());
        assert!(results.iter().all(|r| r.commit_sha.is_some()));
    }

    #[test]
    fn test_check_commit_sets_sha() {
        let (_dir, repo) = repo_with_history(&["fix(kded): patch leak"]);
        let result = engine().check_commit_in(&repo, "HEAD").unwrap();
        assert!(result.is_valid());
        assert_eq!(result.commit_sha.as_ref().map(|sha| sha.len()), Some(40));
    }

    #[test]
    fn test_stored_messages_keep_hash_lines() {
        let body = format!("#define KDED_{} 1", "X".repeat(80));
        let message = format!("fix(kded): guard macro\n\n{}", body);
        let (_dir, repo) = repo_with_history(&[message.as_str()]);

        let result = engine().check_commit_in(&repo, "HEAD").unwrap();
        let rules: Vec<RuleName> = result.violations.iter().map(|v| v.rule).collect();
        assert_eq!(rules, vec![RuleName::BodyMaxLineLength]);
        assert_eq!(result.violations[0].line, Some(3));

        // The same text typed into an editor treats the line as a comment
        assert!(engine().lint(&message).violations.is_empty());
    }
}
