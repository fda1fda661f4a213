mod cli;
mod cli_help;
mod codeowners;
mod config;
mod error;
mod git;
mod identity;
mod offboard;
mod progress;
mod report_helpers;
mod util;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use codeowners::writer::OutputStyle;

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let result = match cli.command {
        Commands::Codeowners {
            history,
            owners_style_file,
            config,
            output,
            all_files,
            json,
            top,
        } => {
            let target = history.path.unwrap_or_else(|| PathBuf::from("."));
            let style = if owners_style_file {
                OutputStyle::Owners
            } else {
                OutputStyle::GithubCodeowners
            };
            codeowners::run(&codeowners::Options {
                path: &target,
                range_days: history.range,
                style,
                config: config.as_deref(),
                output: output.as_deref(),
                all_files,
                json,
                top,
                quiet: cli.quiet,
            })
        }
        Commands::Config {
            history,
            output_path,
        } => {
            let target = history.path.unwrap_or_else(|| PathBuf::from("."));
            config::run(&target, &output_path, history.range)
        }
        Commands::Offboard {
            users,
            path,
            config,
        } => offboard::run(&users, &path, config.as_deref()),
    };

    if let Err(err) = result {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
