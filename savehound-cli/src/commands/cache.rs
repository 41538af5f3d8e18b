use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savehound_catalog::{AppListCache, RefreshPolicy, SteamWebApi};
use savehound_core::util::format_bytes_approx;

use crate::error::CliError;
use crate::spinner::Spinner;

/// Show the cached app list's age and size.
pub(crate) fn run_cache_status() -> Result<(), CliError> {
    let cache = AppListCache::default_location()?;
    let Some(status) = cache.status()? else {
        log::info!(
            "{}",
            "No cached app list.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        log::info!("Run 'savehound cache refresh' to download it.");
        return Ok(());
    };

    log::info!(
        "{}",
        "Steam app list cache:".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log::info!(
        "  File:       {}",
        status.path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    log::info!("  Downloaded: {}", status.downloaded);
    log::info!("  Apps:       {}", status.app_count);
    log::info!("  Size:       {}", format_bytes_approx(status.file_size));
    if status.stale {
        log::info!(
            "  Status:     {} ({} days old, refreshed on next use)",
            "stale".if_supports_color(Stdout, |t| t.yellow()),
            status.age.as_secs() / 86_400,
        );
    } else {
        log::info!(
            "  Status:     {}",
            "fresh".if_supports_color(Stdout, |t| t.green()),
        );
    }
    Ok(())
}

/// Download the app list now.
pub(crate) fn run_cache_refresh(quiet: bool) -> Result<(), CliError> {
    let cache = AppListCache::default_location()?;
    let policy = RefreshPolicy {
        force: true,
        allow_stale: false,
    };

    let spinner = Spinner::start("Downloading Steam app list...", quiet);
    let result = cache.load_or_fetch(&SteamWebApi::default(), policy);
    spinner.finish();
    let catalog = result?;

    log::info!(
        "{} Cached {} apps at {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        catalog.len(),
        cache.path().display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Remove the cached app list.
pub(crate) fn run_cache_clear() -> Result<(), CliError> {
    let cache = AppListCache::default_location()?;
    let freed = cache.clear()?;
    log::info!(
        "{} Cache cleared ({} freed)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        format_bytes_approx(freed),
    );
    Ok(())
}
