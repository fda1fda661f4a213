//! Identity map: the `.sauced.yaml` attribution config.
//!
//! Maps a stable alias (usually a GitHub username or team) to the commit
//! emails it owns, plus a fallback alias list for files with no
//! attributable history:
//!
//! ```yaml
//! attribution:
//!   brandonroberts:
//!     - robertsbt@gmail.com
//! attribution-fallback:
//!   - open-sauced/engineering
//! ```
//!
//! There is no referential integrity between the map and history; it is a
//! pure lookup table.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::util;

/// Default file name, looked up in the repository and the home directory.
pub const CONFIG_FILE_NAME: &str = ".sauced.yaml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityMap {
    /// alias → emails. Sorted by alias, which also fixes which alias wins
    /// when an email is listed under more than one.
    #[serde(rename = "attribution", default)]
    pub attributions: BTreeMap<String, Vec<String>>,

    /// Owners for files with no attributable history.
    #[serde(
        rename = "attribution-fallback",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attribution_fallback: Vec<String>,
}

impl IdentityMap {
    /// Load from the first existing candidate: `explicit`, then
    /// `<repo>/.sauced.yaml`, then `~/.sauced.yaml`. Missing files fall
    /// through; a present but malformed file is an error.
    pub fn load(explicit: Option<&Path>, repo: &Path) -> Result<(Self, PathBuf)> {
        let home = dirs::home_dir();
        Self::load_with_home(explicit, repo, home.as_deref())
    }

    fn load_with_home(
        explicit: Option<&Path>,
        repo: &Path,
        home: Option<&Path>,
    ) -> Result<(Self, PathBuf)> {
        let tried = candidate_paths(explicit, repo, home)?;
        for path in &tried {
            if !path.is_file() {
                debug!(path = %path.display(), "no config at candidate path");
                continue;
            }
            let map = Self::load_from(path)?;
            debug!(path = %path.display(), aliases = map.attributions.len(), "loaded config");
            return Ok((map, path.clone()));
        }
        Err(Error::ConfigNotFound { tried })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .map_err(|e| Error::io("error reading config file", path, e))?;
        serde_yaml::from_str(&data).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(Error::ConfigSerialize)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        util::write_atomic(path, &self.to_yaml()?)
    }

    /// First alias (in alias order) whose email list contains `email`.
    /// Matching is exact and case-sensitive.
    pub fn alias_for_email(&self, email: &str) -> Option<&str> {
        self.attributions
            .iter()
            .find(|(_, emails)| emails.iter().any(|e| e == email))
            .map(|(alias, _)| alias.as_str())
    }

    /// Every alias that lists `email`.
    pub fn aliases_with_email(&self, email: &str) -> Vec<String> {
        self.attributions
            .iter()
            .filter(|(_, emails)| emails.iter().any(|e| e == email))
            .map(|(alias, _)| alias.clone())
            .collect()
    }

    pub fn contains_alias(&self, alias: &str) -> bool {
        self.attributions.contains_key(alias)
    }

    /// Drop an alias and all of its emails.
    pub fn remove_alias(&mut self, alias: &str) -> bool {
        self.attributions.remove(alias).is_some()
    }

    /// Attach `email` to `alias`, keeping emails unique and in insertion order.
    pub fn attribute(&mut self, alias: &str, email: &str) {
        let emails = self.attributions.entry(alias.to_string()).or_default();
        if !emails.iter().any(|e| e == email) {
            emails.push(email.to_string());
        }
    }
}

fn candidate_paths(
    explicit: Option<&Path>,
    repo: &Path,
    home: Option<&Path>,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    if let Some(path) = explicit {
        paths.push(util::expand_home(path)?);
    }
    paths.push(repo.join(CONFIG_FILE_NAME));
    if let Some(home) = home {
        paths.push(home.join(CONFIG_FILE_NAME));
    }
    Ok(paths)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
