//! Error types shared by every command.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias using ownermap's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal conditions. Soft conditions (no owners, out-of-scope paths,
/// offboarding targets that match nothing) never surface as errors.
#[derive(Error, Debug)]
pub enum Error {
    /// The path is not inside a git working tree.
    #[error("not a git repository (or any parent): {}: {source}", .path.display())]
    RepoOpen {
        path: PathBuf,
        #[source]
        source: git2::Error,
    },

    /// The repository has no working tree.
    #[error("bare repositories are not supported: {}", .0.display())]
    BareRepo(PathBuf),

    /// HEAD could not be resolved (empty or corrupt repository).
    #[error("could not get repo head: {0}")]
    Head(#[source] git2::Error),

    /// Tree, parent, or patch computation failed.
    #[error("{op}: {source}")]
    Git {
        op: String,
        #[source]
        source: git2::Error,
    },

    /// No identity map at any candidate location.
    #[error("no config found, tried: {}", join_paths(.tried))]
    ConfigNotFound { tried: Vec<PathBuf> },

    /// Identity map present but malformed.
    #[error("could not parse config at {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("could not serialize config: {0}")]
    ConfigSerialize(#[source] serde_yaml::Error),

    /// Filesystem error, with the operation and the path that failed.
    #[error("{op} {}: {source}", .path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a git error tagged with the operation that failed.
    pub fn git(op: impl Into<String>, source: git2::Error) -> Self {
        Self::Git {
            op: op.into(),
            source,
        }
    }

    /// Create an I/O error tagged with the operation and path.
    pub fn io(op: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.to_path_buf(),
            source,
        }
    }
}

fn join_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
