//! Remove departing contributors from the identity map and the owners file.
//!
//! Each target is either an alias or a commit email. Matching aliases are
//! dropped from `.sauced.yaml` and their `@alias` tokens are cut from every
//! line of `CODEOWNERS` (or `OWNERS`). A target that matches nothing is
//! still cut from the owners file as a literal alias.

use std::fs;
use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::codeowners::writer::OutputStyle;
use crate::error::{Error, Result};
use crate::identity::IdentityMap;
use crate::util;

/// Everything an offboarding run will write, computed up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OffboardPlan {
    pub identity: IdentityMap,
    /// Aliases whose tokens are cut from the owners file, in target order.
    pub scrubbed: Vec<String>,
    pub artifact: String,
}

/// Both files are staged before either is replaced, so a failed run leaves
/// the config and the owners file as they were.
pub fn run(targets: &[String], path: &Path, config: Option<&Path>) -> Result<()> {
    if !path.is_dir() {
        return Err(Error::InvalidPath(format!(
            "{} is not a directory",
            path.display()
        )));
    }

    let (identity, config_path) = IdentityMap::load(config, path)?;
    let (artifact_path, contents) = locate_artifact(path)?;
    debug!(artifact = %artifact_path.display(), "owners file located");

    let plan = offboard(&identity, &contents, targets);

    let artifact = util::stage_write(&artifact_path, &plan.artifact)?;
    let config_file = util::stage_write(&config_path, &plan.identity.to_yaml()?)?;
    debug!(
        artifact = %artifact.target().display(),
        config = %config_file.target().display(),
        "staged both files"
    );
    artifact.commit()?;
    config_file.commit()?;
    info!(
        config = %config_path.display(),
        artifact = %artifact_path.display(),
        "finished offboarding"
    );

    println!(
        "Offboarded {} from {} and {}",
        plan.scrubbed.join(", "),
        config_path.display(),
        artifact_path.display()
    );
    Ok(())
}

/// Apply `targets` to an identity map and the current owners file contents.
pub fn offboard(identity: &IdentityMap, artifact: &str, targets: &[String]) -> OffboardPlan {
    let mut identity = identity.clone();
    let mut scrubbed = Vec::new();

    for target in targets {
        let mut matched = false;

        if identity.contains_alias(target) {
            identity.remove_alias(target);
            scrubbed.push(target.clone());
            matched = true;
        }

        for alias in identity.aliases_with_email(target) {
            identity.remove_alias(&alias);
            scrubbed.push(alias);
            matched = true;
        }

        if !matched {
            warn!(target = %target, "not in the identity map, removing from owners file only");
            scrubbed.push(target.clone());
        }
    }

    let artifact = scrub_artifact(artifact, &scrubbed);
    OffboardPlan {
        identity,
        scrubbed,
        artifact,
    }
}

/// `CODEOWNERS` if present, else `OWNERS`, else an empty `CODEOWNERS`.
pub fn locate_artifact(dir: &Path) -> Result<(PathBuf, String)> {
    for style in [OutputStyle::GithubCodeowners, OutputStyle::Owners] {
        let path = dir.join(style.file_name());
        if path.is_file() {
            let contents = fs::read_to_string(&path)
                .map_err(|e| Error::io("error reading owners file", &path, e))?;
            return Ok((path, contents));
        }
    }
    info!(dir = %dir.display(), "no owners file found, a new CODEOWNERS will be created");
    Ok((dir.join(OutputStyle::GithubCodeowners.file_name()), String::new()))
}

pub fn scrub_artifact(contents: &str, aliases: &[String]) -> String {
    contents
        .split('\n')
        .map(|line| scrub_line(line, aliases))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Cut the first `@alias` token per alias from `line`. Only the first
/// occurrence is removed; a repeated token on the same line survives.
pub fn scrub_line(line: &str, aliases: &[String]) -> String {
    let mut line = line.to_string();
    for alias in aliases {
        if let Some(range) = find_token(&line, &format!("@{alias}")) {
            line.replace_range(range, "");
        }
    }
    line
}

/// Byte range of the first `token` not followed by another alias char,
/// widened to take one preceding whitespace char with it.
fn find_token(line: &str, token: &str) -> Option<Range<usize>> {
    let mut from = 0;
    while let Some(pos) = line[from..].find(token) {
        let start = from + pos;
        let end = start + token.len();
        if !line[end..].chars().next().is_some_and(is_alias_char) {
            let start = match line[..start].chars().next_back() {
                Some(c) if c.is_whitespace() => start - c.len_utf8(),
                _ => start,
            };
            return Some(start..end);
        }
        // tokens start with '@', so the next byte is a char boundary
        from = start + 1;
    }
    None
}

/// Chars that can continue a user or `org/team` alias.
fn is_alias_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '-' | '_' | '/')
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
