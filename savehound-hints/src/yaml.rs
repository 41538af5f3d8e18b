//! YAML loading for human-curated hint files.
//!
//! Each `.yaml`/`.yml` file in the hints directory holds a sequence of
//! hints:
//!
//! ```yaml
//! - app_id: 1091500
//!   path: '%LOCALAPPDATA%\CD Projekt Red\Cyberpunk 2077'
//!   note: PCGamingWiki
//! - app_id: 367520
//!   path: AppData/LocalLow/Team Cherry/Hollow Knight
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::types::{HintSet, KnownPathHint};

#[derive(Debug, Error)]
pub enum HintError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Not a directory: {0}")]
    NotADirectory(String),
}

/// Default hints directory: `~/.config/savehound/hints`.
pub fn hints_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|c| c.join("savehound").join("hints"))
}

/// Parse one hint file.
pub fn load_hint_file(path: &Path) -> Result<Vec<KnownPathHint>, HintError> {
    let contents = std::fs::read_to_string(path).map_err(|e| HintError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    if contents.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yml::from_str(&contents).map_err(|e| HintError::Parse {
        path: path.display().to_string(),
        source: e,
    })
}

/// Load every hint file in `dir`, failing on the first bad file.
///
/// A missing directory means no hints.
pub fn load_hints(dir: &Path) -> Result<HintSet, HintError> {
    let mut all = Vec::new();
    for path in yaml_files(dir)? {
        all.extend(load_hint_file(&path)?);
    }
    Ok(HintSet::new(all))
}

/// Load every hint file in `dir`, skipping (and logging) files that fail.
///
/// Hints only ever raise confidence, so a broken file should not stop a
/// search.
pub fn load_hints_lenient(dir: &Path) -> HintSet {
    let files = match yaml_files(dir) {
        Ok(files) => files,
        Err(e) => {
            log::warn!("{e}");
            return HintSet::default();
        }
    };

    let mut all = Vec::new();
    for path in files {
        match load_hint_file(&path) {
            Ok(hints) => all.extend(hints),
            Err(e) => log::warn!("Skipping hint file: {e}"),
        }
    }
    HintSet::new(all)
}

/// `.yaml`/`.yml` files directly inside `dir`, sorted by file name.
fn yaml_files(dir: &Path) -> Result<Vec<PathBuf>, HintError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    if !dir.is_dir() {
        return Err(HintError::NotADirectory(dir.display().to_string()));
    }

    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .map_err(|e| HintError::Io {
            path: dir.display().to_string(),
            source: e,
        })?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .is_some_and(|ext| ext == "yaml" || ext == "yml")
        })
        .collect();
    files.sort();
    Ok(files)
}
