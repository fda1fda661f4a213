use std::collections::BTreeSet;

use super::stats::{AuthorStats, CodeownerStat, FileStats};
use crate::identity::IdentityMap;

/// Maximum owners listed per file.
pub const TOP_N: usize = 3;

/// Up to `top_n` owners for one file.
///
/// Authors are ranked by lines touched and each one is looked up in the
/// identity map; authors without an alias are skipped rather than listed
/// empty, so a file with history can still end up with no owners. A file
/// with no history at all gets the fallback aliases instead.
pub fn resolve(stats: &AuthorStats, identity: &IdentityMap, top_n: usize) -> Vec<CodeownerStat> {
    if stats.is_empty() {
        return identity
            .attribution_fallback
            .iter()
            .take(top_n)
            .map(|alias| CodeownerStat::fallback(alias))
            .collect();
    }
    ranked_aliases(stats, identity, top_n)
}

fn ranked_aliases(stats: &AuthorStats, identity: &IdentityMap, top_n: usize) -> Vec<CodeownerStat> {
    stats
        .sorted()
        .into_iter()
        .filter_map(|mut stat| {
            let alias = identity.alias_for_email(&stat.email)?;
            stat.alias = alias.to_string();
            Some(stat)
        })
        .take(top_n)
        .collect()
}

/// Every alias attributed from history across all files, sorted and
/// de-duplicated. Fallback aliases are not included.
pub fn unique_aliases(files: &FileStats, identity: &IdentityMap) -> Vec<String> {
    let aliases: BTreeSet<String> = files
        .iter()
        .flat_map(|(_, stats)| ranked_aliases(stats, identity, TOP_N))
        .map(|stat| stat.alias)
        .collect();
    aliases.into_iter().collect()
}

#[cfg(test)]
#[path = "resolver_test.rs"]
mod tests;
