//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "savehound")]
#[command(
    about = "Find where Steam games running under Proton keep their save files",
    long_about = None
)]
pub(crate) struct Cli {
    /// compatdata directory or Steam library to search (repeatable; defaults
    /// to settings.toml, then auto-detected Steam libraries)
    #[arg(short, long = "root", global = true)]
    pub roots: Vec<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Where the app catalog comes from.
#[derive(Args, Clone)]
pub(crate) struct CatalogArgs {
    /// Use this JSON app list instead of the downloaded cache
    #[arg(long)]
    pub catalog_file: Option<PathBuf>,

    /// Download a fresh app list even if the cache is recent
    #[arg(long)]
    pub refresh: bool,

    /// Use the cached app list even if it is over a week old and the
    /// download fails
    #[arg(long)]
    pub offline: bool,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Find save directories for a game
    Find {
        /// Game name (or part of it)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Use the best name match without asking
        #[arg(long)]
        first: bool,

        /// Include games that are not installed in any library
        #[arg(short, long)]
        all: bool,

        /// Also scan Documents and Saved Games
        #[arg(long)]
        documents: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of name matches to choose from
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List catalog games matching a name
    Search {
        /// Game name (or part of it)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Include games that are not installed in any library
        #[arg(short, long)]
        all: bool,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Maximum number of matches to show
        #[arg(short, long, default_value_t = 50)]
        limit: usize,

        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Manage the cached Steam app list
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

impl Commands {
    /// Whether stdout carries a JSON document for this command.
    pub(crate) fn json_output(&self) -> bool {
        match self {
            Commands::Find { json, .. } | Commands::Search { json, .. } => *json,
            Commands::Cache { .. } | Commands::Config { .. } => false,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Show the cached app list's age and size
    Status,

    /// Download the app list now
    Refresh,

    /// Remove the cached app list
    Clear,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show settings, library roots and hints
    Show,

    /// Print the settings file path
    Path,

    /// Add a library root to settings.toml
    AddRoot {
        /// compatdata directory or Steam library
        path: PathBuf,
    },

    /// Remove a library root from settings.toml
    RemoveRoot {
        /// Root as listed by `config show`
        path: PathBuf,
    },
}
