use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savehound_lib::Settings;
use savehound_lib::settings::{
    normalize_library_root, resolve_library_roots, save_library_roots, settings_path,
};

use crate::error::CliError;

/// Show settings, effective library roots and loaded hints.
pub(crate) fn run_config_show(cli_roots: &[PathBuf]) -> Result<(), CliError> {
    let path = settings_path();
    let settings = Settings::load_from(&path)?;

    log::info!(
        "{}",
        "savehound Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");
    log_file_line("Settings file", &path);

    log::info!("");
    log::info!("  Library roots:");
    let roots = resolve_library_roots(cli_roots, &settings);
    let source = if !cli_roots.is_empty() {
        "--root"
    } else if !settings.library.roots.is_empty() {
        "settings.toml"
    } else {
        "auto-detected"
    };
    if roots.is_empty() {
        log::info!(
            "    {}",
            "(none found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    for root in &roots {
        let mark = if root.is_dir() {
            "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string()
        } else {
            "\u{2718}".if_supports_color(Stdout, |t| t.red()).to_string()
        };
        log::info!(
            "    {} {} {}",
            mark,
            root.display().if_supports_color(Stdout, |t| t.cyan()),
            format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    log::info!("");
    log::info!(
        "  Scan Documents/Saved Games: {}",
        settings.scan.include_documents
    );
    log::info!(
        "  Weights: keyword {}, format {}, recency {}",
        settings.weights.keyword,
        settings.weights.format,
        settings.weights.recency,
    );

    log::info!("");
    match savehound_hints::hints_dir() {
        Some(dir) => {
            log_file_line("Hints directory", &dir);
            let hints = savehound_hints::load_hints_lenient(&dir);
            log::info!("  Known save paths: {}", hints.len());
        }
        None => log::info!(
            "  Hints directory: {}",
            "could not determine path".if_supports_color(Stdout, |t| t.red()),
        ),
    }
    Ok(())
}

fn log_file_line(label: &str, path: &Path) {
    let state = if path.exists() {
        "(exists)".if_supports_color(Stdout, |t| t.green()).to_string()
    } else {
        "(not found)".if_supports_color(Stdout, |t| t.dimmed()).to_string()
    };
    log::info!(
        "  {}: {} {}",
        label,
        path.display().if_supports_color(Stdout, |t| t.cyan()),
        state,
    );
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Add a library root to settings.toml (normalized to its compatdata dir).
pub(crate) fn run_config_add_root(path: &Path) -> Result<(), CliError> {
    let absolute = std::path::absolute(path)?;
    if !absolute.is_dir() {
        return Err(CliError::config(format!(
            "{} is not a directory",
            absolute.display()
        )));
    }
    let root = normalize_library_root(&absolute);

    let mut settings = Settings::load_from(&settings_path())?;
    if settings.library.roots.contains(&root) {
        log::info!(
            "{} is already configured",
            root.display().if_supports_color(Stdout, |t| t.cyan()),
        );
        return Ok(());
    }
    settings.library.roots.push(root.clone());
    save_library_roots(&settings.library.roots)?;

    log::info!(
        "{} Added library root {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        root.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}

/// Remove a library root from settings.toml.
pub(crate) fn run_config_remove_root(path: &Path) -> Result<(), CliError> {
    let mut settings = Settings::load_from(&settings_path())?;
    let before = settings.library.roots.len();
    let normalized = std::path::absolute(path)
        .map(|p| normalize_library_root(&p))
        .unwrap_or_else(|_| path.to_path_buf());
    settings
        .library
        .roots
        .retain(|r| r != path && *r != normalized);

    if settings.library.roots.len() == before {
        return Err(CliError::config(format!(
            "{} is not a configured library root",
            path.display()
        )));
    }
    save_library_roots(&settings.library.roots)?;

    log::info!(
        "{} Removed library root {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
