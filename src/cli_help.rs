//! Long help text constants for CLI subcommands.
//!
//! Kept out of `cli.rs` so the argument definitions stay readable.

/// Owners file generation from git history.
pub const CODEOWNERS: &str = "\
Generate a CODEOWNERS (or OWNERS) file from recent git history.

Every commit in the lookback window is diffed against its first parent.
Added + removed lines per file are credited to the commit author. For each
file, the top 3 authors whose email appears in the attribution config
become its owners, ranked by lines touched (ties broken by author name).

Files touched only by authors missing from the config get no owners.
Files with no history in the window get the `attribution-fallback`
owners; use --all-files to include every tracked file so untouched files
receive the fallback too.

The config is read from --config, then <PATH>/.sauced.yaml, then
~/.sauced.yaml:

  attribution:
    alice:
      - alice@example.com
  attribution-fallback:
    - org/maintainers

When PATH is a subdirectory of the repository, only its files are listed,
with paths relative to PATH, and the file is written to PATH/CODEOWNERS.

Output is deterministic: the same history and config always produce the
same bytes. The file is written atomically.

Examples:
  om codeowners                        # current directory, last 90 days
  om codeowners --range 30             # last 30 days
  om codeowners --owners-style-file    # write OWNERS with names and emails
  om codeowners --all-files            # fallback owners for untouched files
  om codeowners --json                 # machine-readable summary";

/// Bootstrapping an attribution config.
pub const CONFIG: &str = "\
Generate a .sauced.yaml attribution config from recent git history.

Each commit author in the lookback window becomes an alias keyed by their
commit name, listing every email they committed with. Authors whose name
contains [bot] are skipped.

Rename the generated aliases to GitHub usernames or teams before running
`om codeowners`.

Examples:
  om config                            # writes ./.sauced.yaml
  om config --output-path ~/           # writes ~/.sauced.yaml
  om config ../repo --range 365        # a year of another repository";

/// Offboarding departed contributors.
pub const OFFBOARD: &str = "\
Remove users from the attribution config and the owners file.

Each argument is an alias or an email:
  alias   -- the alias is removed from the config
  email   -- every alias listing the email is removed from the config
  neither -- nothing changes in the config

Every removed alias (or the raw argument when nothing matched) is then cut
from CODEOWNERS, or OWNERS if there is no CODEOWNERS: the first `@alias`
token on each line is removed. Nothing is written if either file cannot
be replaced. A new empty CODEOWNERS is written when
neither file exists.

Examples:
  om offboard alice                    # by alias
  om offboard alice@example.com bob    # several at once
  om offboard alice --path ../repo     # another repository";
