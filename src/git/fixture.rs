//! Test fixtures: throwaway repositories and an in-memory history.

use std::cell::Cell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use git2::Repository;

use super::{AuthorIdentity, CommitMeta, DiffProvider, FileDiff};
use crate::error::{Error, Result};

pub const DAY: i64 = 86_400;

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

pub fn create_test_repo() -> (tempfile::TempDir, Repository) {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();

    // Configure identity for commits
    let mut config = repo.config().unwrap();
    config.set_str("user.name", "Test").unwrap();
    config.set_str("user.email", "test@test.com").unwrap();

    (dir, repo)
}

/// Write `files` into the working tree, stage them, and commit on top of
/// HEAD as `name <email>` at `epoch`.
pub fn commit_as(
    repo: &Repository,
    name: &str,
    email: &str,
    files: &[(&str, &str)],
    epoch: i64,
) -> git2::Oid {
    let sig = git2::Signature::new(name, email, &git2::Time::new(epoch, 0)).unwrap();
    let mut index = repo.index().unwrap();

    for (path, content) in files {
        let full_path = repo.workdir().unwrap().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
        index.add_path(Path::new(path)).unwrap();
    }

    index.write().unwrap();
    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();

    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, "change", &tree, &parents)
        .unwrap()
}

/// Remove `path` from the working tree and index and commit the deletion.
pub fn delete_as(repo: &Repository, name: &str, email: &str, path: &str, epoch: i64) -> git2::Oid {
    let sig = git2::Signature::new(name, email, &git2::Time::new(epoch, 0)).unwrap();
    fs::remove_file(repo.workdir().unwrap().join(path)).unwrap();
    let mut index = repo.index().unwrap();
    index.remove_path(Path::new(path)).unwrap();
    index.write().unwrap();
    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();
    let parent = repo.head().unwrap().peel_to_commit().unwrap();
    repo.commit(Some("HEAD"), &sig, &sig, "delete", &tree, &[&parent])
        .unwrap()
}

/// Synthetic commit graph: commits newest first, each with a fixed diff.
#[derive(Default)]
pub struct MemoryHistory {
    commits: Vec<CommitMeta>,
    diffs: HashMap<String, Vec<FileDiff>>,
    fail_on: Option<String>,
    pub diff_calls: Cell<usize>,
}

impl MemoryHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commit(
        mut self,
        id: &str,
        author: (&str, &str),
        timestamp: i64,
        files: &[(&str, usize, usize)],
    ) -> Self {
        self.commits.push(CommitMeta {
            id: id.to_string(),
            author: AuthorIdentity::new(author.0, author.1),
            timestamp,
        });
        self.diffs.insert(
            id.to_string(),
            files
                .iter()
                .map(|(path, added, removed)| FileDiff {
                    path: path.to_string(),
                    added: *added,
                    removed: *removed,
                })
                .collect(),
        );
        self
    }

    /// Make `diff` fail for the given commit id.
    pub fn failing_on(mut self, id: &str) -> Self {
        self.fail_on = Some(id.to_string());
        self
    }
}

impl DiffProvider for MemoryHistory {
    fn commits_since(&self, cutoff: i64) -> Result<Vec<CommitMeta>> {
        Ok(self
            .commits
            .iter()
            .filter(|c| c.timestamp >= cutoff)
            .cloned()
            .collect())
    }

    fn diff(&self, commit: &CommitMeta) -> Result<Vec<FileDiff>> {
        self.diff_calls.set(self.diff_calls.get() + 1);
        if self.fail_on.as_deref() == Some(commit.id.as_str()) {
            return Err(Error::git(
                format!("could not get patch for commit {}", commit.id),
                git2::Error::from_str("synthetic failure"),
            ));
        }
        Ok(self.diffs.get(&commit.id).cloned().unwrap_or_default())
    }
}
