//! CLI argument definitions for the `om` command.
//!
//! Defines all subcommands, their arguments, and long help text
//! using the `clap` derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::cli_help;

/// Top-level CLI parser with a single subcommand selector.
#[derive(Parser)]
#[command(name = "om", version, about = "Code ownership from git history")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log level: error, warn, info, debug or trace (RUST_LOG overrides)
    #[arg(
        long,
        global = true,
        default_value = "info",
        value_parser = ["error", "warn", "info", "debug", "trace"]
    )]
    pub log_level: String,

    /// Hide the progress spinner
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Repository and lookback window, shared by the history-walking commands.
#[derive(Args)]
pub struct HistoryArgs {
    /// Repository path (default: current directory)
    pub path: Option<PathBuf>,

    /// Number of days of history to consider (default: 90)
    #[arg(short, long, default_value = "90", value_parser = clap::value_parser!(u32).range(1..))]
    pub range: u32,
}

/// All available subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Generate a CODEOWNERS or OWNERS file from git history
    #[command(long_about = cli_help::CODEOWNERS)]
    Codeowners {
        #[command(flatten)]
        history: HistoryArgs,

        /// Write an OWNERS file (names and emails) instead of CODEOWNERS
        #[arg(long)]
        owners_style_file: bool,

        /// Attribution config (default: <PATH>/.sauced.yaml, then ~/.sauced.yaml)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Write to this file instead of <PATH>/CODEOWNERS
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Include every tracked file, so files without recent history get the fallback owners
        #[arg(long)]
        all_files: bool,

        /// Output the summary as JSON
        #[arg(long)]
        json: bool,

        /// Show only the top N owners in the summary (default: 20)
        #[arg(long, default_value = "20")]
        top: usize,
    },

    /// Generate a .sauced.yaml from the authors in git history
    #[command(long_about = cli_help::CONFIG)]
    Config {
        #[command(flatten)]
        history: HistoryArgs,

        /// Directory to write .sauced.yaml into (default: ./)
        #[arg(long, default_value = "./")]
        output_path: PathBuf,
    },

    /// Remove users from the attribution config and owners file
    #[command(long_about = cli_help::OFFBOARD)]
    Offboard {
        /// Aliases or emails to remove
        #[arg(required = true, value_name = "USER|EMAIL")]
        users: Vec<String>,

        /// Repository path holding CODEOWNERS or OWNERS (default: ./)
        #[arg(short, long, default_value = "./")]
        path: PathBuf,

        /// Attribution config (default: <PATH>/.sauced.yaml, then ~/.sauced.yaml)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}
