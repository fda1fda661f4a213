use super::*;
use crate::git::{AuthorIdentity, CommitDiffStat};
use std::fs;

fn stat(path: &str, name: &str, email: &str, lines: usize) -> CommitDiffStat {
    CommitDiffStat {
        path: path.to_string(),
        added: lines,
        removed: 0,
        author: AuthorIdentity::new(name, email),
        timestamp: 0,
    }
}

fn sample_identity() -> IdentityMap {
    let mut map = IdentityMap::default();
    map.attribute("brandonroberts", "brandon@x.com");
    map.attribute("jpmcb", "john@x.com");
    map.attribution_fallback = vec!["open-sauced/engineering".to_string()];
    map
}

#[test]
fn clean_filename_escapes_specials() {
    assert_eq!(clean_filename("path/to/(home).go"), r"path/to/\(home\).go");
    assert_eq!(clean_filename("path/to/[home].go"), r"path/to/\[home\].go");
    assert_eq!(clean_filename("path/to/+page.go"), r"path/to/\+page.go");
    assert_eq!(clean_filename("routes/[...slug]/+page.svelte"), r"routes/\[...slug\]/\+page.svelte");
}

#[test]
fn clean_filename_keeps_safe_chars() {
    assert_eq!(clean_filename("path/to/go-home.go"), "path/to/go-home.go");
    assert_eq!(clean_filename("it's_fine.v2.rs"), "it's_fine.v2.rs");
    assert_eq!(clean_filename(r"win\path.txt"), r"win\path.txt");
}

#[test]
fn clean_filename_drops_rename_tail() {
    assert_eq!(clean_filename("old.go new.go"), "old.go");
    assert_eq!(clean_filename("a(1).go => b.go"), r"a\(1\).go");
}

#[test]
fn clean_filename_escapes_non_ascii() {
    assert_eq!(clean_filename("docs/café.md"), "docs/caf\\é.md");
}

#[test]
fn codeowners_lines_sorted_with_aliases() {
    let files = FileStats::accumulate(vec![
        stat("b.go", "Brandon", "brandon@x.com", 20),
        stat("b.go", "John", "john@x.com", 15),
        stat("a.go", "John", "john@x.com", 3),
        stat("c.go", "Nobody", "nobody@x.com", 3),
    ]);

    let out = render(&files, &sample_identity(), OutputStyle::GithubCodeowners);
    let expected = format!("{HEADER}a.go @jpmcb\nb.go @brandonroberts @jpmcb\nc.go\n");
    assert_eq!(out, expected);
}

#[test]
fn codeowners_fallback_for_files_without_history() {
    let mut files = FileStats::default();
    files.seed("README.md");

    let out = render(&files, &sample_identity(), OutputStyle::GithubCodeowners);
    assert_eq!(out, format!("{HEADER}README.md @open-sauced/engineering\n"));
}

#[test]
fn codeowners_escapes_paths() {
    let files = FileStats::accumulate(vec![stat("src/(app).ts", "John", "john@x.com", 1)]);
    let out = render(&files, &sample_identity(), OutputStyle::GithubCodeowners);
    assert!(out.ends_with("src/\\(app\\).ts @jpmcb\n"), "got:\n{out}");
}

#[test]
fn owners_blocks_carry_name_and_email() {
    let mut files = FileStats::accumulate(vec![
        stat("a.go", "Brandon", "brandon@x.com", 20),
        stat("a.go", "John", "john@x.com", 15),
    ]);
    files.seed("z.md");

    let out = render(&files, &sample_identity(), OutputStyle::Owners);
    let expected = format!(
        "{HEADER}a.go\n  - Brandon\n    - brandon@x.com\n  - John\n    - john@x.com\nz.md\n  - open-sauced/engineering\n"
    );
    assert_eq!(out, expected);
}

#[test]
fn render_is_idempotent() {
    let files = FileStats::accumulate(vec![
        stat("b.go", "John", "john@x.com", 5),
        stat("b.go", "Brandon", "brandon@x.com", 5),
        stat("a.go", "John", "john@x.com", 1),
    ]);
    let identity = sample_identity();
    let first = render(&files, &identity, OutputStyle::GithubCodeowners);
    let second = render(&files, &identity, OutputStyle::GithubCodeowners);
    assert_eq!(first, second);
    // Equal line counts tie-break on "Name <email>": Brandon before John.
    assert!(first.contains("b.go @brandonroberts @jpmcb\n"));
}

#[test]
fn render_empty_stats_is_header_only() {
    let out = render(&FileStats::default(), &sample_identity(), OutputStyle::Owners);
    assert_eq!(out, HEADER);
}

#[test]
fn style_file_names() {
    assert_eq!(OutputStyle::GithubCodeowners.file_name(), "CODEOWNERS");
    assert_eq!(OutputStyle::Owners.file_name(), "OWNERS");
}

#[test]
fn write_artifact_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("CODEOWNERS");
    write_artifact(&path, "x @y\n").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "x @y\n");
}
