//! Directory scanner for Proton prefixes.
//!
//! Only looks inside the per-profile save locations of one app's prefix:
//!
//! ```text
//! {library_root}/{app_id}/pfx/drive_c/users/<profile>/AppData/{Local,Roaming,LocalLow}
//! ```
//!
//! and yields the subdirectories one and two levels below each location.
//! Known save paths can sit deeper than that, so [`DirectoryScanner::scan_hinted`]
//! follows each hint's components straight down instead of walking the tree.
//! Anything it cannot read is skipped; a scan never fails.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use savehound_core::{CandidateDirectory, SaveLocation};
use savehound_hints::KnownPathHint;

/// Which locations inside each profile are scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// Also scan `Documents` and `Saved Games`.
    pub include_documents: bool,
}

impl ScanOptions {
    pub fn locations(&self) -> &'static [SaveLocation] {
        if self.include_documents {
            SaveLocation::all()
        } else {
            SaveLocation::appdata()
        }
    }
}

/// `{library_root}/{app_id}/pfx/drive_c/users`.
pub fn prefix_users_dir(library_root: &Path, app_id: u32) -> PathBuf {
    library_root
        .join(app_id.to_string())
        .join("pfx")
        .join("drive_c")
        .join("users")
}

/// Enumerates candidate save directories for one app under one library root.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryScanner {
    options: ScanOptions,
}

impl DirectoryScanner {
    pub fn new(options: ScanOptions) -> Self {
        Self { options }
    }

    /// Scan `library_root` for `app_id`.
    ///
    /// Returns an empty `Vec` when the app has no prefix under this root.
    /// Candidates are ordered by profile, location, then path.
    pub fn scan(&self, library_root: &Path, app_id: u32) -> Vec<CandidateDirectory> {
        let users = prefix_users_dir(library_root, app_id);
        if !users.is_dir() {
            log::debug!("No prefix for {app_id} under {}", library_root.display());
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for (profile, _) in list_subdirs(&users) {
            for &location in self.options.locations() {
                let mut location_dir = profile.clone();
                location_dir.extend(location.relative_dir());
                if !location_dir.is_dir() {
                    continue;
                }
                self.scan_location(library_root, &profile, location, &location_dir, &mut candidates);
            }
        }

        log::debug!(
            "Found {} candidate directories for {app_id} under {}",
            candidates.len(),
            library_root.display()
        );
        candidates
    }

    /// Resolve `hints` to existing directories in every profile of the prefix.
    ///
    /// Components compare case-insensitively and `*` matches any one
    /// directory. Only directories below a known [`SaveLocation`] are
    /// returned, whatever the scan options say.
    pub fn scan_hinted(
        &self,
        library_root: &Path,
        app_id: u32,
        hints: &[KnownPathHint],
    ) -> Vec<CandidateDirectory> {
        if hints.is_empty() {
            return Vec::new();
        }
        let users = prefix_users_dir(library_root, app_id);
        if !users.is_dir() {
            return Vec::new();
        }

        let mut candidates = Vec::new();
        for (profile, _) in list_subdirs(&users) {
            for hint in hints {
                let pattern = hint.components();
                let Some(location) = hint_location(&pattern) else {
                    log::debug!("Hint '{}' is not under a save location", hint.path);
                    continue;
                };

                let mut found = vec![profile.clone()];
                for component in &pattern {
                    found = found
                        .iter()
                        .flat_map(|dir| list_subdirs(dir))
                        .map(|(path, _)| path)
                        .filter(|path| component == "*" || name_matches(path, component))
                        .collect();
                    if found.is_empty() {
                        break;
                    }
                }

                for dir in found {
                    if candidates.iter().any(|c: &CandidateDirectory| c.path == dir) {
                        continue;
                    }
                    if let Some(c) = describe(library_root, &profile, location, &dir) {
                        candidates.push(c);
                    }
                }
            }
        }
        candidates
    }

    fn scan_location(
        &self,
        library_root: &Path,
        profile: &Path,
        location: SaveLocation,
        location_dir: &Path,
        out: &mut Vec<CandidateDirectory>,
    ) {
        for (dir, dir_is_link) in list_subdirs(location_dir) {
            if let Some(c) = describe(library_root, profile, location, &dir) {
                out.push(c);
            }

            for (nested, nested_is_link) in list_subdirs(&dir) {
                // One symlink hop per chain
                if dir_is_link && nested_is_link {
                    log::debug!("Not following nested symlink {}", nested.display());
                    continue;
                }
                if let Some(c) = describe(library_root, profile, location, &nested) {
                    out.push(c);
                }
            }
        }
    }
}

/// Subdirectories of `dir`, sorted, with whether each entry is a symlink.
///
/// Symlinks are included only if they point at a directory. Unreadable
/// directories and entries are skipped.
fn list_subdirs(dir: &Path) -> Vec<(PathBuf, bool)> {
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::debug!("Skipping unreadable {}: {e}", dir.display());
            return Vec::new();
        }
    };

    let mut dirs: Vec<(PathBuf, bool)> = entries
        .flatten()
        .filter_map(|entry| {
            let file_type = entry.file_type().ok()?;
            let path = entry.path();
            if file_type.is_dir() {
                Some((path, false))
            } else if file_type.is_symlink() {
                fs::metadata(&path)
                    .ok()
                    .filter(|m| m.is_dir())
                    .map(|_| (path, true))
            } else {
                None
            }
        })
        .collect();

    dirs.sort();
    dirs
}

/// The location a lowercased hint pattern starts with, if it reaches below it.
fn hint_location(pattern: &[String]) -> Option<SaveLocation> {
    SaveLocation::all().iter().copied().find(|loc| {
        let dir = loc.relative_dir();
        pattern.len() > dir.len()
            && dir
                .iter()
                .zip(pattern)
                .all(|(d, p)| d.eq_ignore_ascii_case(p))
    })
}

fn name_matches(path: &Path, component: &str) -> bool {
    path.file_name()
        .is_some_and(|n| n.to_string_lossy().to_lowercase() == component)
}

/// Build a candidate for `dir`, or `None` if it cannot be read.
fn describe(
    library_root: &Path,
    profile: &Path,
    location: SaveLocation,
    dir: &Path,
) -> Option<CandidateDirectory> {
    let meta = fs::metadata(dir).ok()?;
    let entries = match fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            log::debug!("Skipping unreadable {}: {e}", dir.display());
            return None;
        }
    };

    let mut last_modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
    let mut markers = BTreeSet::new();
    for entry in entries.flatten() {
        if let Ok(child_mtime) = entry.metadata().and_then(|m| m.modified()) {
            last_modified = last_modified.max(child_mtime);
        }
        markers.insert(entry.file_name().to_string_lossy().into_owned());
    }

    let relative_path = dir.strip_prefix(profile).ok()?.to_path_buf();

    Some(CandidateDirectory {
        path: dir.to_path_buf(),
        library_root: library_root.to_path_buf(),
        location,
        relative_path,
        last_modified,
        contains_markers: markers,
    })
}

#[cfg(test)]
#[path = "tests/scanner_tests.rs"]
mod tests;
