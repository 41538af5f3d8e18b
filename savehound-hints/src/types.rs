//! Curated known save paths.
//!
//! A hint says "app N keeps its saves at this path inside the prefix user
//! profile". Paths are `/`-separated and relative to
//! `drive_c/users/<profile>/`. Hints copied straight from a wiki may use
//! Windows environment variables instead:
//!
//! ```text
//! %LOCALAPPDATA%\CD Projekt Red\Cyberpunk 2077   -> AppData/Local/CD Projekt Red/Cyberpunk 2077
//! %USERPROFILE%\Saved Games\CD Projekt Red        -> Saved Games/CD Projekt Red
//! ```

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A curated expected save location for one app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownPathHint {
    pub app_id: u32,
    /// Relative path pattern. `*` matches exactly one component.
    pub path: String,
    #[serde(default)]
    pub note: Option<String>,
}

impl KnownPathHint {
    pub fn new(app_id: u32, path: impl Into<String>) -> Self {
        Self {
            app_id,
            path: path.into(),
            note: None,
        }
    }

    /// Pattern components after expanding Windows variables, lowercased.
    pub fn components(&self) -> Vec<String> {
        expand_windows_vars(&self.path)
            .split(['/', '\\'])
            .filter(|c| !c.is_empty() && *c != ".")
            .map(str::to_lowercase)
            .collect()
    }

    /// Whether `relative_path` (relative to the profile directory) is the
    /// hinted location. Comparison is per component and case-insensitive.
    pub fn matches(&self, relative_path: &Path) -> bool {
        let pattern = self.components();
        if pattern.is_empty() {
            return false;
        }
        let actual: Vec<String> = relative_path
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_lowercase())
            .collect();

        pattern.len() == actual.len()
            && pattern
                .iter()
                .zip(&actual)
                .all(|(p, a)| p == "*" || p == a)
    }
}

/// Known Windows folder variables and their location inside a Wine profile.
const WINDOWS_VARS: &[(&str, &str)] = &[
    ("%localappdata%", "AppData/Local"),
    ("%appdata%", "AppData/Roaming"),
    ("%userprofile%", ""),
    ("%homepath%", ""),
];

/// Replace a leading Windows folder variable with its profile-relative path.
fn expand_windows_vars(path: &str) -> String {
    let trimmed = path.trim();
    for (var, replacement) in WINDOWS_VARS {
        if let Some(prefix) = trimmed.get(..var.len()) {
            if prefix.eq_ignore_ascii_case(var) {
                return format!("{replacement}/{}", &trimmed[var.len()..]);
            }
        }
    }
    trimmed.to_string()
}

/// All loaded hints, grouped by app id.
#[derive(Debug, Clone, Default)]
pub struct HintSet {
    by_app: HashMap<u32, Vec<KnownPathHint>>,
}

impl HintSet {
    pub fn new(hints: impl IntoIterator<Item = KnownPathHint>) -> Self {
        let mut by_app: HashMap<u32, Vec<KnownPathHint>> = HashMap::new();
        for hint in hints {
            by_app.entry(hint.app_id).or_default().push(hint);
        }
        Self { by_app }
    }

    /// Hints for `app_id`, in load order. Empty if none are known.
    pub fn for_app(&self, app_id: u32) -> &[KnownPathHint] {
        self.by_app.get(&app_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.by_app.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_app.is_empty()
    }
}
