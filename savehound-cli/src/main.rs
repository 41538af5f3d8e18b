//! savehound CLI
//!
//! Command-line interface for finding Proton save directories of Steam games.

mod cli_types;
mod commands;
mod error;
mod picker;
mod spinner;

use std::io::Write;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use cli_types::{CacheAction, Cli, Commands, ConfigAction};
use commands::find::FindOptions;
use error::CliError;

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet, cli.command.json_output());

    if let Err(e) = run(cli) {
        log::error!(
            "{} {}",
            "\u{2718}".if_supports_color(Stderr, |t| t.red()),
            e,
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Find {
            query,
            first,
            all,
            documents,
            json,
            limit,
            catalog,
        } => commands::find::run_find(
            &query.join(" "),
            FindOptions {
                first,
                all,
                documents,
                json,
                limit,
            },
            &catalog,
            &cli.roots,
            cli.quiet,
        ),
        Commands::Search {
            query,
            all,
            json,
            limit,
            catalog,
        } => commands::search::run_search(
            &query.join(" "),
            all,
            json,
            limit,
            &catalog,
            &cli.roots,
            cli.quiet,
        ),
        Commands::Cache { action } => match action {
            CacheAction::Status => commands::cache::run_cache_status(),
            CacheAction::Refresh => commands::cache::run_cache_refresh(cli.quiet),
            CacheAction::Clear => commands::cache::run_cache_clear(),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&cli.roots),
            ConfigAction::Path => {
                commands::config::run_config_path();
                Ok(())
            }
            ConfigAction::AddRoot { path } => commands::config::run_config_add_root(&path),
            ConfigAction::RemoveRoot { path } => commands::config::run_config_remove_root(&path),
        },
    }
}

/// Route `log` output to the terminal.
///
/// Normal runs print bare `info` messages (they are the CLI's output).
/// `--verbose` adds debug messages with timestamps and levels; `--quiet`
/// keeps only warnings and errors. `RUST_LOG` overrides both. With `--json`
/// every log line goes to stderr so stdout holds only the document.
fn init_logging(verbose: bool, quiet: bool, json: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(log::LevelFilter::Warn)
        .filter_module("savehound", level)
        .filter_module("savehound_lib", level)
        .filter_module("savehound_catalog", level)
        .filter_module("savehound_hints", level)
        .filter_module("savehound_core", level)
        .target(if json {
            env_logger::Target::Stderr
        } else {
            env_logger::Target::Stdout
        })
        .parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| match record.level() {
            log::Level::Info => writeln!(buf, "{}", record.args()),
            level => writeln!(buf, "{}: {}", level.as_str().to_lowercase(), record.args()),
        });
    }

    builder.init();
}
