//! Generate a `CODEOWNERS` or `OWNERS` file from recent git history.
//!
//! Every in-window commit is diffed against its first parent; each file's
//! added + removed lines are credited to the commit author. Per file, the
//! top three authors that map to an alias in the identity map become its
//! owners. Files whose history yields no authors at all get the
//! `attribution-fallback` owners instead.

mod report;
pub mod resolver;
pub mod stats;
pub mod writer;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::git::{GitRepo, HistoryWalker};
use crate::identity::IdentityMap;
use crate::progress;
use crate::report_helpers;
use crate::util;
use stats::FileStats;
use writer::OutputStyle;

pub struct Options<'a> {
    pub path: &'a Path,
    pub range_days: u32,
    pub style: OutputStyle,
    pub config: Option<&'a Path>,
    pub output: Option<&'a Path>,
    pub all_files: bool,
    pub json: bool,
    pub top: usize,
    pub quiet: bool,
}

pub fn run(opts: &Options) -> Result<()> {
    let repo = GitRepo::open(opts.path)?;
    debug!(root = %repo.root().display(), "opened repository");

    let (identity, config_path) = IdentityMap::load(opts.config, opts.path)?;
    info!(config = %config_path.display(), "using attribution config");

    let scope = repo.scope_for(opts.path)?;
    debug!(scope = %scope.prefix().display(), "limiting history to scope");
    let cutoff = util::cutoff_timestamp(opts.range_days);
    info!(days = opts.range_days, "looking back through history");

    let spinner = progress::commit_spinner(!opts.quiet, opts.path);
    let diffs = HistoryWalker::new(&repo, scope.clone())
        .with_progress(spinner)
        .walk(cutoff)?;

    // Paths are written relative to the analyzed directory, next to which
    // the owners file lands.
    let mut files = FileStats::accumulate(diffs.into_iter().map(|mut stat| {
        stat.path = scope.relative(&stat.path);
        stat
    }));
    if opts.all_files {
        for path in repo.tracked_files(&scope)? {
            files.seed(scope.relative(&path));
        }
    }
    if files.is_empty() {
        warn!(days = opts.range_days, "no files changed in the lookback window");
    }
    debug!(files = files.len(), "accumulated file stats");

    let output = output_path(opts.path, opts.output, opts.style);
    let contents = writer::render(&files, &identity, opts.style);
    writer::write_artifact(&output, &contents)?;
    info!(output = %output.display(), files = files.len(), "finished writing owners file");

    let mut owners = report::summarize(&files, &identity);
    let aliases = resolver::unique_aliases(&files, &identity);
    let file_count = files.len();
    report_helpers::output_results(
        &mut owners,
        opts.top,
        opts.json,
        |o| report::print_json(&output, file_count, &aliases, o),
        |o| report::print_report(&output, file_count, o),
    )
}

fn output_path(repo_path: &Path, explicit: Option<&Path>, style: OutputStyle) -> PathBuf {
    match explicit {
        Some(path) => path.to_path_buf(),
        None => repo_path.join(style.file_name()),
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
