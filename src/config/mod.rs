//! Bootstrap a `.sauced.yaml` from recent history.
//!
//! Every in-window commit author becomes an alias keyed by their commit
//! name, listing the emails they committed with. Bot accounts are skipped.
//! The result is a starting point: aliases are meant to be renamed to the
//! matching GitHub usernames by hand.

use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::git::{CommitMeta, DiffProvider, GitRepo};
use crate::identity::{CONFIG_FILE_NAME, IdentityMap};
use crate::util;

pub fn run(path: &Path, output_dir: &Path, range_days: u32) -> Result<()> {
    let repo = GitRepo::open(path)?;
    let cutoff = util::cutoff_timestamp(range_days);
    info!(days = range_days, "looking back through history");

    let commits = repo.commits_since(cutoff)?;
    let identity = identity_from_commits(&commits);
    debug!(commits = commits.len(), authors = identity.attributions.len(), "collected authors");

    let output = util::expand_home(output_dir)?.join(CONFIG_FILE_NAME);
    identity.save(&output)?;
    info!(output = %output.display(), "finished writing config");

    println!(
        "Wrote {} ({} authors)",
        output.display(),
        identity.attributions.len()
    );
    Ok(())
}

/// Build an identity map with one alias per author name.
pub fn identity_from_commits(commits: &[CommitMeta]) -> IdentityMap {
    let mut identity = IdentityMap::default();
    for commit in commits {
        if is_bot(&commit.author.name) {
            continue;
        }
        identity.attribute(&commit.author.name, &commit.author.email);
    }
    identity
}

fn is_bot(name: &str) -> bool {
    name.contains("[bot]")
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
