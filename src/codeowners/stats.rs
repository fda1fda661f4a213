use std::collections::BTreeMap;

use tracing::trace;

use crate::git::{AuthorIdentity, CommitDiffStat};

/// Cumulative lines one author touched in one file, plus the alias the
/// resolver attributed to them (empty until resolved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeownerStat {
    pub name: String,
    pub email: String,
    pub lines: usize,
    pub alias: String,
}

impl CodeownerStat {
    fn new(author: &AuthorIdentity) -> Self {
        Self {
            name: author.name.clone(),
            email: author.email.clone(),
            lines: 0,
            alias: String::new(),
        }
    }

    /// Fallback owner: the alias doubles as display name, no email.
    pub fn fallback(alias: &str) -> Self {
        Self {
            name: alias.to_string(),
            email: String::new(),
            lines: 0,
            alias: alias.to_string(),
        }
    }
}

/// Ranked projection of a file's [`AuthorStats`].
pub type AuthorStatSlice = Vec<CodeownerStat>;

/// Per-file author statistics, keyed by `"Name <email>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorStats {
    by_author: BTreeMap<String, CodeownerStat>,
}

impl AuthorStats {
    pub fn add(&mut self, author: &AuthorIdentity, lines: usize) {
        self.by_author
            .entry(author.key())
            .or_insert_with(|| CodeownerStat::new(author))
            .lines += lines;
    }

    pub fn is_empty(&self) -> bool {
        self.by_author.is_empty()
    }

    /// Authors by descending line count. Equal counts keep author-key
    /// order, so the ranking is deterministic across runs.
    pub fn sorted(&self) -> AuthorStatSlice {
        let mut slice: AuthorStatSlice = self.by_author.values().cloned().collect();
        slice.sort_by(|a, b| b.lines.cmp(&a.lines));
        slice
    }
}

/// Path → [`AuthorStats`], iterated in sorted path order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStats {
    files: BTreeMap<String, AuthorStats>,
}

impl FileStats {
    pub fn accumulate(stats: impl IntoIterator<Item = CommitDiffStat>) -> Self {
        let mut files = Self::default();
        for stat in stats {
            files.add(&stat);
        }
        files
    }

    pub fn add(&mut self, stat: &CommitDiffStat) {
        trace!(
            path = %stat.path,
            author = %stat.author.key(),
            lines = stat.lines(),
            timestamp = stat.timestamp,
            "accumulating"
        );
        self.files
            .entry(stat.path.clone())
            .or_default()
            .add(&stat.author, stat.lines());
    }

    /// Make sure `path` is listed, without any authors if it is new.
    pub fn seed(&mut self, path: impl Into<String>) {
        self.files.entry(path.into()).or_default();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AuthorStats)> {
        self.files.iter().map(|(path, stats)| (path.as_str(), stats))
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod tests;
