//! Git access for the ownership engine.
//!
//! Everything the walker needs from a repository goes through the
//! [`DiffProvider`] trait: the commits inside the lookback window and the
//! per-file line stats of each commit against its first parent. [`GitRepo`]
//! implements it on top of libgit2; tests swap in an in-memory history.

mod walker;

#[cfg(test)]
pub mod fixture;

pub use walker::{CommitDiffStat, HistoryWalker};

use std::path::{Component, Path, PathBuf};

use git2::{DiffOptions, ObjectType, Oid, Patch, Repository, Sort, TreeWalkMode, TreeWalkResult};

use crate::error::{Error, Result};

/// A commit author as recorded in history.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AuthorIdentity {
    pub name: String,
    pub email: String,
}

impl AuthorIdentity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Composite `"Name <email>"` key.
    pub fn key(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }
}

/// Metadata of a commit inside the lookback window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMeta {
    pub id: String,
    pub author: AuthorIdentity,
    pub timestamp: i64,
}

/// Line stats for one file in one commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiff {
    pub path: String,
    pub added: usize,
    pub removed: usize,
}

pub trait DiffProvider {
    /// Commits reachable from HEAD whose timestamp is not older than
    /// `cutoff`, newest first.
    fn commits_since(&self, cutoff: i64) -> Result<Vec<CommitMeta>>;

    /// Files changed by `commit` relative to its first parent, or relative
    /// to an empty tree for a root commit.
    fn diff(&self, commit: &CommitMeta) -> Result<Vec<FileDiff>>;
}

/// The part of the working tree under analysis, as a prefix relative to
/// the repository root. The empty prefix covers the whole repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    prefix: PathBuf,
}

impl Scope {
    pub fn new(prefix: impl Into<PathBuf>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// Whether a repository-relative path stays inside this scope once
    /// `.` and `..` components are resolved lexically.
    pub fn contains(&self, rel_path: &str) -> bool {
        let mut parts = Vec::new();
        for component in Path::new(rel_path).components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    if parts.pop().is_none() {
                        return false;
                    }
                }
                Component::RootDir | Component::Prefix(_) => return false,
            }
        }
        let normalized: PathBuf = parts.iter().collect();
        normalized.starts_with(&self.prefix)
    }

    /// `rel_path` relative to the scope directory, `/`-separated. Paths
    /// outside the scope come back unchanged.
    pub fn relative(&self, rel_path: &str) -> String {
        if self.prefix.as_os_str().is_empty() {
            return rel_path.to_string();
        }
        match Path::new(rel_path).strip_prefix(&self.prefix) {
            Ok(rest) => rest
                .components()
                .map(|c| c.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/"),
            Err(_) => rel_path.to_string(),
        }
    }
}

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path).map_err(|source| Error::RepoOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let root = repo
            .workdir()
            .ok_or_else(|| Error::BareRepo(path.to_path_buf()))?
            .to_path_buf();
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scope covering `path`, which must live inside the working tree.
    pub fn scope_for(&self, path: &Path) -> Result<Scope> {
        let root = self
            .root
            .canonicalize()
            .map_err(|e| Error::io("could not resolve", &self.root, e))?;
        let target = path
            .canonicalize()
            .map_err(|e| Error::io("could not resolve", path, e))?;
        let prefix = target.strip_prefix(&root).map_err(|_| {
            Error::InvalidPath(format!(
                "{} is outside the working tree {}",
                target.display(),
                root.display()
            ))
        })?;
        Ok(Scope::new(prefix))
    }

    /// Every file in the HEAD tree that falls inside `scope`.
    pub fn tracked_files(&self, scope: &Scope) -> Result<Vec<String>> {
        let head = self.repo.head().map_err(Error::Head)?;
        let tree = head
            .peel_to_tree()
            .map_err(|e| Error::git("could not get HEAD tree", e))?;

        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() == Some(ObjectType::Blob)
                && let Some(name) = entry.name()
            {
                let path = format!("{dir}{name}");
                if scope.contains(&path) {
                    files.push(path);
                }
            }
            TreeWalkResult::Ok
        })
        .map_err(|e| Error::git("could not walk HEAD tree", e))?;

        Ok(files)
    }

    fn find_commit(&self, id: &str) -> Result<git2::Commit<'_>> {
        let oid = Oid::from_str(id).map_err(|e| Error::git(format!("invalid commit id {id}"), e))?;
        self.repo
            .find_commit(oid)
            .map_err(|e| Error::git(format!("could not find commit {oid}"), e))
    }
}

impl DiffProvider for GitRepo {
    fn commits_since(&self, cutoff: i64) -> Result<Vec<CommitMeta>> {
        let head = self.repo.head().map_err(Error::Head)?;
        let head_oid = head
            .target()
            .ok_or_else(|| Error::Head(git2::Error::from_str("HEAD is not a direct reference")))?;

        let mut revwalk = self
            .repo
            .revwalk()
            .map_err(|e| Error::git("could not get repo log iterator", e))?;
        revwalk
            .push(head_oid)
            .map_err(|e| Error::git("could not get repo log iterator", e))?;
        revwalk
            .set_sorting(Sort::TIME)
            .map_err(|e| Error::git("could not get repo log iterator", e))?;

        let mut commits = Vec::new();
        for oid in revwalk {
            let oid = oid.map_err(|e| Error::git("could not process commit iterator", e))?;
            let commit = self
                .repo
                .find_commit(oid)
                .map_err(|e| Error::git(format!("could not find commit {oid}"), e))?;

            let time = commit.time().seconds();
            if time < cutoff {
                continue;
            }

            let author = commit.author();
            commits.push(CommitMeta {
                id: oid.to_string(),
                author: AuthorIdentity::new(
                    String::from_utf8_lossy(author.name_bytes()),
                    String::from_utf8_lossy(author.email_bytes()),
                ),
                timestamp: time,
            });
        }

        Ok(commits)
    }

    fn diff(&self, meta: &CommitMeta) -> Result<Vec<FileDiff>> {
        let commit = self.find_commit(&meta.id)?;
        let tree = commit
            .tree()
            .map_err(|e| Error::git(format!("could not get commit tree for commit {}", meta.id), e))?;

        // Root commit: diff against no tree so every line counts as added.
        let parent_tree = if commit.parent_count() > 0 {
            let parent = commit.parent(0).map_err(|e| {
                Error::git(format!("could not get parent commit to commit {}", meta.id), e)
            })?;
            let parent_tree = parent.tree().map_err(|e| {
                Error::git(
                    format!("could not get parent commit tree for parent commit {}", parent.id()),
                    e,
                )
            })?;
            Some(parent_tree)
        } else {
            None
        };

        let mut opts = DiffOptions::new();
        let diff = self
            .repo
            .diff_tree_to_tree(parent_tree.as_ref(), Some(&tree), Some(&mut opts))
            .map_err(|e| Error::git(format!("could not get patch for commit {}", meta.id), e))?;

        let mut files = Vec::new();
        for (idx, delta) in diff.deltas().enumerate() {
            let Some(path) = delta.new_file().path().or_else(|| delta.old_file().path()) else {
                continue;
            };

            let patch = Patch::from_diff(&diff, idx)
                .map_err(|e| Error::git(format!("could not get patch for commit {}", meta.id), e))?;
            let (added, removed) = match patch {
                Some(patch) => {
                    let (_, added, removed) = patch.line_stats().map_err(|e| {
                        Error::git(format!("could not get patch stats for commit {}", meta.id), e)
                    })?;
                    (added, removed)
                }
                None => (0, 0),
            };

            files.push(FileDiff {
                path: path.to_string_lossy().into_owned(),
                added,
                removed,
            });
        }

        Ok(files)
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
