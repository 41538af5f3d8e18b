//! On-disk cache of the Steam app list.
//!
//! The app list is a ~10 MB download, so it is cached under
//! `~/.cache/savehound/applist.json` and refreshed once it is older than
//! [`STALE_AFTER`]. Callers get back an immutable [`CatalogIndex`] snapshot;
//! nothing in this module holds process-wide state.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use savehound_core::CatalogEntry;

use crate::error::CatalogError;
use crate::index::CatalogIndex;

/// Cache format version. Bump this when changing the cached layout to
/// invalidate old files automatically.
const CACHE_VERSION: u32 = 1;

/// Cached app lists older than this are refreshed before use.
pub const STALE_AFTER: Duration = Duration::from_secs(7 * 24 * 60 * 60);

/// Steam Web API endpoint listing every public app.
pub const STEAM_APPLIST_URL: &str = "https://api.steampowered.com/ISteamApps/GetAppList/v2/";

const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Layout of the cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CachedAppList {
    #[serde(default)]
    version: u32,
    /// RFC 3339 timestamp, for display.
    downloaded: String,
    downloaded_unix: i64,
    #[serde(default)]
    app_count: usize,
    apps: Vec<CatalogEntry>,
}

/// Summary of the cache file for display.
#[derive(Debug, Clone)]
pub struct CacheStatus {
    pub path: PathBuf,
    pub downloaded: String,
    pub age: Duration,
    pub app_count: usize,
    pub file_size: u64,
    pub stale: bool,
}

/// Something that can produce the full app list.
pub trait AppListSource {
    fn fetch(&self) -> Result<Vec<CatalogEntry>, CatalogError>;
}

/// Downloads the app list from the Steam Web API.
#[derive(Debug, Clone)]
pub struct SteamWebApi {
    pub url: String,
}

impl Default for SteamWebApi {
    fn default() -> Self {
        Self {
            url: STEAM_APPLIST_URL.to_string(),
        }
    }
}

impl AppListSource for SteamWebApi {
    fn fetch(&self) -> Result<Vec<CatalogEntry>, CatalogError> {
        log::debug!("Downloading app list from {}", self.url);
        let client = reqwest::blocking::Client::builder()
            .timeout(DOWNLOAD_TIMEOUT)
            .build()
            .map_err(|e| CatalogError::download(format!("Failed to build HTTP client: {e}")))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| CatalogError::download(format!("Failed to download app list: {e}")))?;

        if !response.status().is_success() {
            return Err(CatalogError::download(format!(
                "HTTP {} for app list ({})",
                response.status(),
                self.url
            )));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| CatalogError::download(format!("Failed to read app list: {e}")))?;

        let index = CatalogIndex::load(&body)?;
        Ok(filter_games(index.all_entries().cloned()))
    }
}

/// Drop entries that are almost certainly not games: very short names and
/// Steamworks redistributables.
pub fn filter_games(entries: impl IntoIterator<Item = CatalogEntry>) -> Vec<CatalogEntry> {
    entries
        .into_iter()
        .filter(|e| e.name.chars().count() > 3 && !e.name.starts_with("Steamworks"))
        .collect()
}

/// Controls when [`AppListCache::load_or_fetch`] downloads.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefreshPolicy {
    /// Download even if the cache is fresh.
    pub force: bool,
    /// If the download fails, fall back to a stale cache instead of erroring.
    /// Off unless the user asks to work offline.
    pub allow_stale: bool,
}

/// The app list cache file.
#[derive(Debug, Clone)]
pub struct AppListCache {
    path: PathBuf,
}

/// Get the cache directory for savehound.
pub fn cache_dir() -> Result<PathBuf, CatalogError> {
    let base = dirs::cache_dir()
        .ok_or_else(|| CatalogError::cache("Could not determine cache directory"))?;
    Ok(base.join("savehound"))
}

impl AppListCache {
    /// Cache at an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Cache at `~/.cache/savehound/applist.json`.
    pub fn default_location() -> Result<Self, CatalogError> {
        Ok(Self::at(cache_dir()?.join("applist.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return a catalog snapshot, downloading from `source` when the cache
    /// is missing, unreadable, stale, or `policy.force` is set.
    pub fn load_or_fetch(
        &self,
        source: &dyn AppListSource,
        policy: RefreshPolicy,
    ) -> Result<CatalogIndex, CatalogError> {
        let cached = self.read();

        if !policy.force {
            if let Some(c) = &cached {
                if !is_stale(c.downloaded_unix, now_unix()) {
                    log::debug!("Using cached app list ({} apps)", c.apps.len());
                    return Ok(CatalogIndex::from_entries(c.apps.clone()));
                }
                log::info!("Cached app list is older than a week, refreshing");
            }
        }

        match source.fetch() {
            Ok(apps) => {
                self.store(&apps)?;
                Ok(CatalogIndex::from_entries(apps))
            }
            Err(e) => match cached {
                Some(c) if policy.allow_stale => {
                    log::warn!("{e}; falling back to cached app list from {}", c.downloaded);
                    Ok(CatalogIndex::from_entries(c.apps))
                }
                _ => Err(e),
            },
        }
    }

    /// Write `apps` to the cache file, stamped with the current time.
    pub fn store(&self, apps: &[CatalogEntry]) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let now = chrono::Utc::now();
        let cached = CachedAppList {
            version: CACHE_VERSION,
            downloaded: now.to_rfc3339(),
            downloaded_unix: now.timestamp(),
            app_count: apps.len(),
            apps: apps.to_vec(),
        };
        let contents = serde_json::to_string(&cached)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Cached {} apps at {}", apps.len(), self.path.display());
        Ok(())
    }

    /// Describe the cache file, or `None` if there is no usable cache.
    pub fn status(&self) -> Result<Option<CacheStatus>, CatalogError> {
        let Some(cached) = self.read() else {
            return Ok(None);
        };
        let file_size = fs::metadata(&self.path)?.len();
        let age_secs = (now_unix() - cached.downloaded_unix).max(0) as u64;
        Ok(Some(CacheStatus {
            path: self.path.clone(),
            downloaded: cached.downloaded,
            age: Duration::from_secs(age_secs),
            app_count: cached.apps.len(),
            file_size,
            stale: is_stale(cached.downloaded_unix, now_unix()),
        }))
    }

    /// Delete the cache file. Returns the number of bytes freed.
    pub fn clear(&self) -> Result<u64, CatalogError> {
        if !self.path.exists() {
            return Ok(0);
        }
        let size = fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0);
        fs::remove_file(&self.path)?;
        Ok(size)
    }

    /// Read the cache file; missing, corrupt or old-version files are `None`.
    fn read(&self) -> Option<CachedAppList> {
        let contents = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<CachedAppList>(&contents) {
            Ok(c) if c.version == CACHE_VERSION => Some(c),
            Ok(c) => {
                log::debug!("Ignoring app list cache version {}", c.version);
                None
            }
            Err(e) => {
                log::warn!("Ignoring unreadable app list cache {}: {e}", self.path.display());
                None
            }
        }
    }
}

/// Load a user-supplied catalog file (bare array or Steam envelope).
pub fn load_catalog_file(path: &Path) -> Result<CatalogIndex, CatalogError> {
    let contents = fs::read_to_string(path)?;
    Ok(CatalogIndex::from_json_str(&contents)?)
}

fn is_stale(downloaded_unix: i64, now_unix: i64) -> bool {
    now_unix - downloaded_unix >= STALE_AFTER.as_secs() as i64
}

fn now_unix() -> i64 {
    chrono::Utc::now().timestamp()
}
