//! Progress spinner for the commit walk.

use std::io::IsTerminal;
use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

/// Spinner on stderr that counts processed commits. Hidden when disabled
/// or when stderr is not a terminal.
pub fn commit_spinner(enabled: bool, repo: &Path) -> ProgressBar {
    if !enabled || !std::io::stderr().is_terminal() {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new_spinner();
    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} {msg} ({pos} commits)")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    bar.set_style(style);
    bar.set_message(format!("Iterating commits for repo: {}", repo.display()));
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
