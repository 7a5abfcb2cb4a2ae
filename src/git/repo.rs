// Author: Eshan Roy
// SPDX-License-Identifier: MIT

//! Repository operations.

use crate::error::{GitError, LintError, Result};
use git2::{Oid, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Wrapper around git2::Repository for reading commit messages.
pub struct Repository {
    inner: Git2Repo,
}

impl Repository {
    /// Open a repository from the current directory.
    pub fn open_current() -> Result<Self> {
        let current_dir = std::env::current_dir().map_err(|e| {
            LintError::Git(GitError::OpenFailed {
                message: format!("Failed to get current directory: {}", e),
            })
        })?;
        Self::open(&current_dir)
    }

    /// Open a repository from a path.
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Git2Repo::discover(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                LintError::Git(GitError::NotARepository)
            } else {
                LintError::Git(GitError::OpenFailed {
                    message: e.message().to_string(),
                })
            }
        })?;

        Ok(Self { inner: repo })
    }

    /// Get the git directory path (.git).
    pub fn git_dir(&self) -> &Path {
        self.inner.path()
    }

    /// Path of the message file git hands to `commit-msg` hooks.
    pub fn commit_editmsg_path(&self) -> PathBuf {
        self.git_dir().join("COMMIT_EDITMSG")
    }

    /// Get a commit by reference (SHA, branch name, etc.).
    pub fn get_commit(&self, reference: &str) -> Result<git2::Commit<'_>> {
        let obj = self.inner.revparse_single(reference).map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        let commit = obj.peel_to_commit().map_err(|e| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: {}", reference, e.message()),
            })
        })?;

        Ok(commit)
    }

    /// Get the SHA and message of a reference.
    pub fn get_commit_message(&self, reference: &str) -> Result<(Oid, String)> {
        let commit = self.get_commit(reference)?;
        let message = commit.message().ok_or_else(|| {
            LintError::Git(GitError::InvalidReference {
                reference: format!("{}: Invalid message encoding", reference),
            })
        })?;
        Ok((commit.id(), message.to_string()))
    }

    /// Get commits in a range, newest first.
    ///
    /// `A..B` walks from B back to (but excluding) A; a single reference
    /// yields just that commit.
    pub fn get_commits_in_range(&self, range: &str) -> Result<Vec<(Oid, String)>> {
        if range.contains("...") {
            return Err(LintError::Git(GitError::InvalidReference {
                reference: format!(
                    "{}: symmetric ranges (A...B) are not supported, use A..B",
                    range
                ),
            }));
        }

        let Some((from, to)) = range.split_once("..") else {
            return Ok(vec![self.get_commit_message(range)?]);
        };
        let to = if to.is_empty() { "HEAD" } else { to };

        let walk_error = |command: &str, e: git2::Error| {
            LintError::Git(GitError::CommandFailed {
                command: command.to_string(),
                message: e.message().to_string(),
            })
        };

        let mut revwalk = self.inner.revwalk().map_err(|e| walk_error("revwalk", e))?;
        let to_commit = self.get_commit(to)?;
        revwalk
            .push(to_commit.id())
            .map_err(|e| walk_error("revwalk.push", e))?;
        if !from.is_empty() {
            let from_commit = self.get_commit(from)?;
            revwalk
                .hide(from_commit.id())
                .map_err(|e| walk_error("revwalk.hide", e))?;
        }

        let mut commits = Vec::new();
        for oid_result in revwalk {
            let oid = oid_result.map_err(|e| walk_error("revwalk", e))?;
            let commit = self.inner.find_commit(oid).map_err(|e| {
                LintError::Git(GitError::InvalidReference {
                    reference: format!("{}: {}", oid, e.message()),
                })
            })?;
            commits.push((oid, commit.message().unwrap_or("").to_string()));
        }

        tracing::debug!("Found {} commit(s) in range {}", commits.len(), range);
        Ok(commits)
    }
}

/// Open the repository from the current directory.
pub fn open_repo() -> Result<Repository> {
    Repository::open_current()
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::Signature;
    use tempfile::TempDir;

    fn create_test_repo(messages: &[&str]) -> (TempDir, Repository) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();

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

    #[test]
    fn test_open_repo() {
        let (dir, repo) = create_test_repo(&["feat: first"]);
        assert!(Repository::open(dir.path()).is_ok());
        assert!(repo.commit_editmsg_path().ends_with("COMMIT_EDITMSG"));
    }

    #[test]
    fn test_not_a_repo() {
        let dir = TempDir::new().unwrap();
        let result = Repository::open(dir.path());
        assert!(matches!(
            result,
            Err(LintError::Git(GitError::NotARepository))
        ));
    }

    #[test]
    fn test_get_commit_message() {
        let (_dir, repo) = create_test_repo(&["feat: first", "fix(kcm): second"]);
        let (_, message) = repo.get_commit_message("HEAD").unwrap();
        assert_eq!(message, "fix(kcm): second");
    }

    #[test]
    fn test_invalid_reference() {
        let (_dir, repo) = create_test_repo(&["feat: first"]);
        assert!(matches!(
            repo.get_commit_message("does-not-exist"),
            Err(LintError::Git(GitError::InvalidReference { .. }))
        ));
    }

    #[test]
    fn test_range_newest_first() {
        let (_dir, repo) = create_test_repo(&["feat: one", "fix: two", "docs: three"]);
        let commits = repo.get_commits_in_range("HEAD~2..HEAD").unwrap();
        let messages: Vec<&str> = commits.iter().map(|(_, m)| m.as_str()).collect();
        assert_eq!(messages, vec!["docs: three", "fix: two"]);
    }

    #[test]
    fn test_range_open_end_defaults_to_head() {
        let (_dir, repo) = create_test_repo(&["feat: one", "fix: two"]);
        let commits = repo.get_commits_in_range("HEAD~1..").unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, "fix: two");
    }

    #[test]
    fn test_single_reference_range() {
        let (_dir, repo) = create_test_repo(&["feat: one", "fix: two"]);
        let commits = repo.get_commits_in_range("HEAD~1").unwrap();
        assert_eq!(commits.len(), 1);
        assert_eq!(commits[0].1, "feat: one");
    }

    #[test]
    fn test_symmetric_range_rejected() {
        let (_dir, repo) = create_test_repo(&["feat: one", "fix: two"]);
        let err = repo.get_commits_in_range("HEAD~1...HEAD").unwrap_err();
        assert!(matches!(err, LintError::Git(GitError::InvalidReference { .. })));
        assert!(err.to_string().contains("use A..B"));
    }
}
