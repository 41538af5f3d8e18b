use std::io::IsTerminal;
use std::path::PathBuf;
use std::time::SystemTime;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Serialize;

use savehound_core::util::format_age;
use savehound_core::{CatalogEntry, ScoredCandidate};
use savehound_lib::{FirstMatch, MatchPicker, RankedResult, SaveFinder, ScanOptions, Settings};

use super::{library_roots, load_catalog};
use crate::cli_types::CatalogArgs;
use crate::error::CliError;
use crate::picker::TerminalPicker;

pub(crate) struct FindOptions {
    pub first: bool,
    pub all: bool,
    pub documents: bool,
    pub json: bool,
    pub limit: usize,
}

#[derive(Serialize)]
struct FindOutput<'a> {
    app_id: u32,
    name: &'a str,
    results: &'a RankedResult,
}

/// Find save directories for the game matching `query`.
pub(crate) fn run_find(
    query: &str,
    options: FindOptions,
    catalog_args: &CatalogArgs,
    cli_roots: &[PathBuf],
    quiet: bool,
) -> Result<(), CliError> {
    let settings = Settings::load();
    let roots = library_roots(cli_roots, &settings);
    let catalog = load_catalog(catalog_args, quiet || options.json)?;

    let hints = match savehound_hints::hints_dir() {
        Some(dir) => savehound_hints::load_hints_lenient(&dir),
        None => savehound_hints::HintSet::default(),
    };
    log::debug!("Loaded {} known save path hints", hints.len());

    let scan = ScanOptions {
        include_documents: options.documents || settings.scan.include_documents,
    };
    let finder = SaveFinder::new(roots, scan)
        .with_weights(settings.weights)
        .with_match_limit(options.limit);

    let interactive = prompts_for_match(&options, quiet, std::io::stdin().is_terminal());
    let mut picker: Box<dyn MatchPicker> = if interactive {
        Box::new(TerminalPicker)
    } else {
        Box::new(FirstMatch)
    };

    let installed_only = !options.all;
    let Some(located) = finder.locate(query, &catalog, &hints, picker.as_mut(), installed_only)?
    else {
        if options.json {
            println!("null");
        } else {
            log::warn!(
                "{} No {}game matches '{}'",
                "\u{2718}".if_supports_color(Stdout, |t| t.red()),
                if installed_only { "installed " } else { "" },
                query,
            );
            if installed_only {
                log::warn!("Use --all to search games that are not installed.");
            }
        }
        return Ok(());
    };

    if options.json {
        let out = FindOutput {
            app_id: located.entry.app_id,
            name: &located.entry.name,
            results: &located.results,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    print_results(&located.entry, &located.results);
    Ok(())
}

/// Only ask which game was meant when the list and the prompt can both be
/// seen. `--quiet` hides the list, so it takes the best match instead.
fn prompts_for_match(options: &FindOptions, quiet: bool, stdin_is_terminal: bool) -> bool {
    !options.first && !options.json && !quiet && stdin_is_terminal
}

fn print_results(entry: &CatalogEntry, results: &RankedResult) {
    log::info!(
        "{} {}",
        entry.name.if_supports_color(Stdout, |t| t.bold()),
        format!("({})", entry.app_id).if_supports_color(Stdout, |t| t.dimmed()),
    );
    log::info!("");

    if results.is_empty() {
        log::info!(
            "{}",
            "No candidate save directories found.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return;
    }

    let now = SystemTime::now();
    for (i, candidate) in results.iter().enumerate() {
        print_candidate(i + 1, candidate, now);
    }
    log::info!("");
    log::info!(
        "{} candidates, {} from known save paths",
        results.len(),
        results.hinted_count(),
    );
}

fn print_candidate(rank: usize, c: &ScoredCandidate, now: SystemTime) {
    let label = if c.is_hinted() {
        format!(" {}", "[known]".if_supports_color(Stdout, |t| t.green()))
    } else {
        String::new()
    };
    log::info!(
        "  {:>3}. {}{}",
        rank,
        c.path.display().if_supports_color(Stdout, |t| t.cyan()),
        label,
    );

    let reasons: Vec<String> = c.reasons.iter().map(ToString::to_string).collect();
    let mut detail = format!("score {:.2}", c.score);
    if !reasons.is_empty() {
        detail.push_str(&format!(": {}", reasons.join(", ")));
    }
    if let Some(age) = now
        .duration_since(c.last_modified)
        .ok()
        .and_then(format_age)
    {
        detail.push_str(&format!(" ({age})"));
    }
    log::info!(
        "       {}",
        detail.if_supports_color(Stdout, |t| t.dimmed())
    );
}
