use std::path::Path;

use super::resolver::{TOP_N, resolve};
use super::stats::{CodeownerStat, FileStats};
use crate::error::Result;
use crate::identity::IdentityMap;
use crate::util;

pub const HEADER: &str = "# This file is generated automatically by ownermap. DO NOT EDIT.\n\n";

/// Artifact flavour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// `path @alias1 @alias2` lines, as GitHub reads them.
    GithubCodeowners,
    /// Tool-agnostic YAML-like blocks carrying name and email.
    Owners,
}

impl OutputStyle {
    pub fn file_name(self) -> &'static str {
        match self {
            OutputStyle::GithubCodeowners => "CODEOWNERS",
            OutputStyle::Owners => "OWNERS",
        }
    }
}

/// Render the whole artifact. Files come out in sorted path order, so the
/// same history and identity map always produce the same bytes.
pub fn render(files: &FileStats, identity: &IdentityMap, style: OutputStyle) -> String {
    let mut out = String::from(HEADER);
    for (path, stats) in files.iter() {
        let owners = resolve(stats, identity, TOP_N);
        match style {
            OutputStyle::GithubCodeowners => push_codeowners_line(&mut out, path, &owners),
            OutputStyle::Owners => push_owners_block(&mut out, path, &owners),
        }
    }
    out
}

fn push_codeowners_line(out: &mut String, path: &str, owners: &[CodeownerStat]) {
    out.push_str(&clean_filename(path));
    for owner in owners {
        out.push_str(" @");
        out.push_str(&owner.alias);
    }
    out.push('\n');
}

fn push_owners_block(out: &mut String, path: &str, owners: &[CodeownerStat]) {
    out.push_str(path);
    out.push('\n');
    for owner in owners {
        out.push_str("  - ");
        out.push_str(&owner.name);
        out.push('\n');
        if !owner.email.is_empty() {
            out.push_str("    - ");
            out.push_str(&owner.email);
            out.push('\n');
        }
    }
}

/// Make a path safe for glob-reading consumers of `CODEOWNERS`.
///
/// Anything after the first space is dropped (leftover `old new` rename
/// notation), then every character other than ASCII word characters,
/// `.`, `'`, `-`, whitespace, `/` and `\` is backslash-escaped.
pub fn clean_filename(filename: &str) -> String {
    let name = filename.split(' ').next().unwrap_or_default();
    let mut escaped = String::with_capacity(name.len());
    for c in name.chars() {
        if !is_safe_char(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '_' | '.' | '\'' | '-' | '/' | '\\' | ' ' | '\t' | '\n' | '\r' | '\x0C'
        )
}

pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    util::write_atomic(path, contents)
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod tests;
