use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savehound_lib::{SaveFinder, Settings};

use super::{library_roots, load_catalog};
use crate::cli_types::CatalogArgs;
use crate::error::CliError;

/// List catalog games matching `query`, best first.
pub(crate) fn run_search(
    query: &str,
    all: bool,
    json: bool,
    limit: usize,
    catalog_args: &CatalogArgs,
    cli_roots: &[PathBuf],
    quiet: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let roots = library_roots(cli_roots, &settings);
    let catalog = load_catalog(catalog_args, quiet || json)?;

    let finder = SaveFinder::new(roots, settings.scan).with_match_limit(limit);
    let matches = finder.search(query, &catalog, !all)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&matches)?);
        return Ok(());
    }

    if matches.is_empty() {
        log::info!(
            "{}",
            format!("No {}games match '{query}'.", if all { "" } else { "installed " })
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    let installed_ids = if all {
        finder.installed_app_ids()
    } else {
        Default::default()
    };
    for m in &matches {
        let installed = if installed_ids.contains(&m.app_id) {
            " [installed]"
        } else {
            ""
        };
        log::info!(
            "  {}  {}{}  {}",
            format!("{:>8}", m.app_id).if_supports_color(Stdout, |t| t.cyan()),
            m.name,
            installed.if_supports_color(Stdout, |t| t.green()),
            format!("{:.0}%", m.similarity * 100.0).if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");
    log::info!("{} of {} catalog apps shown", matches.len(), catalog.len());
    Ok(())
}
