//! User settings and library root resolution.
//!
//! The settings file is `~/.config/savehound/settings.toml`:
//!
//! ```toml
//! [library]
//! roots = ["/home/me/.steam/steam/steamapps/compatdata"]
//!
//! [scan]
//! include_documents = false
//!
//! [weights]
//! keyword = 4.0
//! format = 2.0
//! recency = 3.0
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::SettingsError;
use crate::scanner::ScanOptions;
use crate::scorer::ScoreWeights;

/// Canonical path to the settings file: `~/.config/savehound/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("savehound").join("settings.toml")
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    pub roots: Vec<PathBuf>,
}

/// Everything `settings.toml` can configure. Missing sections use defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub library: LibrarySettings,
    pub scan: ScanOptions,
    pub weights: ScoreWeights,
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(SettingsError::io(path.display().to_string(), e)),
        };
        toml::from_str(&contents).map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Read the default settings file, falling back to defaults (with a
    /// warning) if it cannot be parsed.
    pub fn load() -> Self {
        let path = settings_path();
        Self::load_from(&path).unwrap_or_else(|e| {
            log::warn!("{e}; using default settings");
            Self::default()
        })
    }
}

/// Rewrite a Steam library or `steamapps` directory to its
/// `steamapps/compatdata` child when that exists. Other paths are returned
/// unchanged.
pub fn normalize_library_root(path: &Path) -> PathBuf {
    if path.file_name().is_some_and(|n| n == "compatdata") {
        return path.to_path_buf();
    }
    let candidates = [
        path.join("compatdata"),
        path.join("steamapps").join("compatdata"),
    ];
    for candidate in candidates {
        if candidate.is_dir() {
            return candidate;
        }
    }
    path.to_path_buf()
}

/// Normalize every root and drop duplicates, keeping first-seen order.
pub fn normalize_library_roots(roots: &[PathBuf]) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = Vec::with_capacity(roots.len());
    for root in roots {
        let normalized = normalize_library_root(root);
        if !out.contains(&normalized) {
            out.push(normalized);
        }
    }
    out
}

/// Steam library folders found by `steamlocate`, plus the usual install
/// locations under the home directory.
pub fn detect_steam_libraries() -> Vec<PathBuf> {
    let mut found = Vec::new();

    match steamlocate::SteamDir::locate() {
        Ok(steam_dir) => match steam_dir.libraries() {
            Ok(libraries) => {
                for library in libraries {
                    match library {
                        Ok(lib) => found.push(lib.path().to_path_buf()),
                        Err(e) => log::debug!("Skipping Steam library: {e}"),
                    }
                }
            }
            Err(e) => log::debug!("Could not read Steam libraries: {e}"),
        },
        Err(e) => log::debug!("Steam installation not found: {e}"),
    }

    if let Some(home) = dirs::home_dir() {
        for fallback in [
            home.join(".steam").join("steam"),
            home.join(".local").join("share").join("Steam"),
        ] {
            if fallback.is_dir() {
                found.push(fallback);
            }
        }
    }

    found
}

/// Resolve the library roots using a priority chain:
///
/// 1. CLI `--root` values (if any)
/// 2. `library.roots` in `settings.toml`
/// 3. Auto-detected Steam libraries
///
/// The result is normalized to `compatdata` directories and deduplicated.
pub fn resolve_library_roots(cli_roots: &[PathBuf], settings: &Settings) -> Vec<PathBuf> {
    if !cli_roots.is_empty() {
        return normalize_library_roots(cli_roots);
    }
    if !settings.library.roots.is_empty() {
        return normalize_library_roots(&settings.library.roots);
    }
    let detected = detect_steam_libraries();
    log::debug!("Auto-detected {} Steam libraries", detected.len());
    normalize_library_roots(&detected)
}

/// Replace `library.roots` in the settings file at `path`.
///
/// Uses `toml::Value` for a surgical update so unrelated keys and sections
/// are preserved. An empty `roots` removes the key.
pub fn save_library_roots_to(path: &Path, roots: &[PathBuf]) -> Result<(), SettingsError> {
    let mut doc: toml::Value = match std::fs::read_to_string(path) {
        Ok(contents) => contents.parse().map_err(|e| SettingsError::Parse {
            path: path.display().to_string(),
            source: e,
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            toml::Value::Table(Default::default())
        }
        Err(e) => return Err(SettingsError::io(path.display().to_string(), e)),
    };

    // Ensure [library] table exists
    let table = doc
        .as_table_mut()
        .ok_or_else(|| SettingsError::malformed("settings.toml root is not a table"))?;
    let library = table
        .entry("library")
        .or_insert_with(|| toml::Value::Table(Default::default()));
    let lib_table = library
        .as_table_mut()
        .ok_or_else(|| SettingsError::malformed("[library] is not a table"))?;

    if roots.is_empty() {
        lib_table.remove("roots");
    } else {
        let values = roots
            .iter()
            .map(|r| toml::Value::String(r.to_string_lossy().into_owned()))
            .collect();
        lib_table.insert("roots".to_string(), toml::Value::Array(values));
    }

    // Write atomically
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| SettingsError::io(parent.display().to_string(), e))?;
    }
    let serialized = toml::to_string_pretty(&doc)?;
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, &serialized)
        .map_err(|e| SettingsError::io(tmp.display().to_string(), e))?;
    std::fs::rename(&tmp, path).map_err(|e| SettingsError::io(path.display().to_string(), e))?;

    Ok(())
}

/// Replace `library.roots` in the default settings file.
pub fn save_library_roots(roots: &[PathBuf]) -> Result<(), SettingsError> {
    save_library_roots_to(&settings_path(), roots)
}

/// Load the settings file as a pretty-printed TOML string for display.
pub fn load_settings_string(path: &Path) -> Option<String> {
    let contents = std::fs::read_to_string(path).ok()?;
    let doc: toml::Value = contents.parse().ok()?;
    toml::to_string_pretty(&doc).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_missing() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&tmp.path().join("nope.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.weights.max_score(), 9.0);
        assert!(!settings.scan.include_documents);
    }

    #[test]
    fn test_partial_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(
            &path,
            "[library]\nroots = [\"/games/compatdata\"]\n\n[weights]\nrecency = 1.5\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.library.roots, vec![PathBuf::from("/games/compatdata")]);
        assert_eq!(settings.weights.recency, 1.5);
        assert_eq!(settings.weights.keyword, 4.0);
    }

    #[test]
    fn test_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.toml");
        std::fs::write(&path, "[library\nroots = 3").unwrap();
        assert!(matches!(
            Settings::load_from(&path),
            Err(SettingsError::Parse { .. })
        ));
    }

    #[test]
    fn test_normalize_steam_library() {
        let tmp = tempfile::tempdir().unwrap();
        let library = tmp.path().join("SteamLibrary");
        let compat = library.join("steamapps").join("compatdata");
        std::fs::create_dir_all(&compat).unwrap();

        assert_eq!(normalize_library_root(&library), compat);
        assert_eq!(normalize_library_root(&library.join("steamapps")), compat);
        assert_eq!(normalize_library_root(&compat), compat);

        // No compatdata underneath: left alone
        let other = tmp.path().join("elsewhere");
        std::fs::create_dir_all(&other).unwrap();
        assert_eq!(normalize_library_root(&other), other);
    }

    #[test]
    fn test_normalize_dedups_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        let library = tmp.path().join("lib");
        let compat = library.join("steamapps").join("compatdata");
        std::fs::create_dir_all(&compat).unwrap();
        let b = tmp.path().join("b");

        let roots = normalize_library_roots(&[b.clone(), library, compat.clone(), b.clone()]);
        assert_eq!(roots, vec![b, compat]);
    }

    #[test]
    fn test_cli_roots_take_priority() {
        let settings = Settings {
            library: LibrarySettings {
                roots: vec![PathBuf::from("/from/settings")],
            },
            ..Default::default()
        };
        let cli = vec![PathBuf::from("/from/cli")];
        assert_eq!(resolve_library_roots(&cli, &settings), cli);
        assert_eq!(
            resolve_library_roots(&[], &settings),
            vec![PathBuf::from("/from/settings")]
        );
    }

    #[test]
    fn test_save_preserves_other_keys() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("config").join("settings.toml");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "[weights]\nkeyword = 5.0\n\n[library]\nextra = true\n").unwrap();

        save_library_roots_to(&path, &[PathBuf::from("/a"), PathBuf::from("/b")]).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(
            settings.library.roots,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
        assert_eq!(settings.weights.keyword, 5.0);
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("extra = true"));
        assert!(!path.with_extension("toml.tmp").exists());

        save_library_roots_to(&path, &[]).unwrap();
        let settings = Settings::load_from(&path).unwrap();
        assert!(settings.library.roots.is_empty());
    }

    #[test]
    fn test_save_creates_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("new").join("settings.toml");
        save_library_roots_to(&path, &[PathBuf::from("/x")]).unwrap();
        assert!(load_settings_string(&path).unwrap().contains("/x"));
    }
}
