pub(crate) mod cache;
pub(crate) mod config;
pub(crate) mod find;
pub(crate) mod search;

use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savehound_catalog::{AppListCache, CatalogIndex, RefreshPolicy, SteamWebApi};
use savehound_lib::Settings;

use crate::cli_types::CatalogArgs;
use crate::error::CliError;
use crate::spinner::Spinner;

/// Load the app catalog from `--catalog-file` or the download cache.
///
/// A cache older than a week is refreshed before use. Only `--offline`
/// lets a failed refresh fall back to it.
pub(crate) fn load_catalog(args: &CatalogArgs, quiet: bool) -> Result<CatalogIndex, CliError> {
    if let Some(path) = &args.catalog_file {
        let catalog = savehound_catalog::load_catalog_file(path)?;
        log::debug!("Loaded {} apps from {}", catalog.len(), path.display());
        return Ok(catalog);
    }

    let cache = AppListCache::default_location()?;
    let policy = refresh_policy(args);
    let spinner = Spinner::start("Loading Steam app list...", quiet);
    let result = cache.load_or_fetch(&SteamWebApi::default(), policy);
    spinner.finish();
    Ok(result?)
}

fn refresh_policy(args: &CatalogArgs) -> RefreshPolicy {
    RefreshPolicy {
        force: args.refresh,
        allow_stale: args.offline,
    }
}

/// Library roots for this run, warning when there are none.
pub(crate) fn library_roots(cli_roots: &[PathBuf], settings: &Settings) -> Vec<PathBuf> {
    let roots = savehound_lib::settings::resolve_library_roots(cli_roots, settings);
    if roots.is_empty() {
        log::warn!(
            "{} No Steam library found. Pass --root <compatdata dir> or run 'savehound config add-root <path>'.",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
    }
    for root in &roots {
        log::debug!("Library root: {}", root.display());
    }
    roots
}
