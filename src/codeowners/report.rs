use std::collections::BTreeMap;
use std::path::Path;

use serde::Serialize;

use super::resolver::{TOP_N, resolve};
use super::stats::FileStats;
use crate::error::Result;
use crate::identity::IdentityMap;
use crate::report_helpers::{max_width, print_json_stdout, separator};

/// How much of the tree one alias ended up owning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub alias: String,
    pub files: usize,
    pub lines: usize,
}

/// Aggregate resolved owners per alias, most files first.
pub fn summarize(files: &FileStats, identity: &IdentityMap) -> Vec<OwnerSummary> {
    let mut by_alias: BTreeMap<String, OwnerSummary> = BTreeMap::new();
    for (_, stats) in files.iter() {
        for owner in resolve(stats, identity, TOP_N) {
            let entry = by_alias
                .entry(owner.alias.clone())
                .or_insert_with(|| OwnerSummary {
                    alias: owner.alias.clone(),
                    files: 0,
                    lines: 0,
                });
            entry.files += 1;
            entry.lines += owner.lines;
        }
    }

    let mut summary: Vec<OwnerSummary> = by_alias.into_values().collect();
    summary.sort_by(|a, b| b.files.cmp(&a.files).then_with(|| b.lines.cmp(&a.lines)));
    summary
}

pub fn print_report(output: &Path, file_count: usize, owners: &[OwnerSummary]) {
    println!("Wrote {} ({file_count} files)", output.display());

    if owners.is_empty() {
        println!("No owners resolved. Check the attribution emails in your config.");
        return;
    }

    let alias_width = max_width(owners.iter().map(|o| o.alias.as_str()), 5);
    let sep = separator((alias_width + 20).max(40));

    println!("{sep}");
    println!(" {:<aw$} {:>7} {:>9}", "Owner", "Files", "Lines", aw = alias_width);
    println!("{sep}");
    for o in owners {
        println!(
            " {:<aw$} {:>7} {:>9}",
            format!("@{}", o.alias),
            o.files,
            o.lines,
            aw = alias_width
        );
    }
    println!("{sep}");
}

#[derive(Serialize)]
struct JsonReport<'a> {
    output: String,
    files: usize,
    /// Flat alias list, the shape a contributor list expects.
    aliases: &'a [String],
    owners: &'a [OwnerSummary],
}

pub fn print_json(
    output: &Path,
    file_count: usize,
    aliases: &[String],
    owners: &[OwnerSummary],
) -> Result<()> {
    print_json_stdout(&JsonReport {
        output: output.display().to_string(),
        files: file_count,
        aliases,
        owners,
    })
}
