use indicatif::ProgressBar;
use tracing::{debug, trace};

use super::{AuthorIdentity, CommitMeta, DiffProvider, Scope};
use crate::error::Result;

/// One file touched by one commit, with the commit's author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitDiffStat {
    pub path: String,
    pub added: usize,
    pub removed: usize,
    pub author: AuthorIdentity,
    pub timestamp: i64,
}

impl CommitDiffStat {
    /// Lines touched: additions plus deletions.
    pub fn lines(&self) -> usize {
        self.added + self.removed
    }
}

/// Walks the lookback window and flattens every commit's diff into
/// [`CommitDiffStat`]s, dropping paths outside the scope.
pub struct HistoryWalker<'a, P: DiffProvider> {
    provider: &'a P,
    scope: Scope,
    progress: ProgressBar,
}

impl<'a, P: DiffProvider> HistoryWalker<'a, P> {
    pub fn new(provider: &'a P, scope: Scope) -> Self {
        Self {
            provider,
            scope,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Any provider error aborts the walk; no partial results are returned.
    pub fn walk(&self, cutoff: i64) -> Result<Vec<CommitDiffStat>> {
        let commits = self.provider.commits_since(cutoff)?;
        debug!(commits = commits.len(), cutoff, "collected commits in lookback window");

        let result = self.collect(&commits);
        self.progress.finish_and_clear();
        result
    }

    fn collect(&self, commits: &[CommitMeta]) -> Result<Vec<CommitDiffStat>> {
        let mut stats = Vec::new();

        for commit in commits {
            for file in self.provider.diff(commit)? {
                if !self.scope.contains(&file.path) {
                    trace!(path = %file.path, commit = %commit.id, "skipping path outside scope");
                    continue;
                }

                stats.push(CommitDiffStat {
                    path: file.path,
                    added: file.added,
                    removed: file.removed,
                    author: commit.author.clone(),
                    timestamp: commit.timestamp,
                });
            }
            self.progress.inc(1);
        }

        Ok(stats)
    }
}

#[cfg(test)]
#[path = "walker_test.rs"]
mod tests;
