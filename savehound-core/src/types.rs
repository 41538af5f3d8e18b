//! Shared data model: catalog entries, name matches, scan candidates and
//! their scores.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::SystemTime;

use serde::{Deserialize, Serialize};

use crate::location::SaveLocation;

/// One `{appid, name}` pair from the reference catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(rename = "appid")]
    pub app_id: u32,
    pub name: String,
}

impl CatalogEntry {
    pub fn new(app_id: u32, name: impl Into<String>) -> Self {
        Self {
            app_id,
            name: name.into(),
        }
    }
}

/// A catalog entry that matched a free-text query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NameMatch {
    pub app_id: u32,
    pub name: String,
    /// In `(0, 1]`; 1.0 means the query is a substring of the name.
    pub similarity: f64,
}

/// A directory inside a Proton prefix that might hold save data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDirectory {
    /// Absolute path as discovered (symlinks are not resolved).
    pub path: PathBuf,
    /// The `compatdata` root this candidate was found under.
    pub library_root: PathBuf,
    pub location: SaveLocation,
    /// Path relative to `drive_c/users/<profile>/`,
    /// e.g. `AppData/Local/CD Projekt Red/Cyberpunk 2077`.
    pub relative_path: PathBuf,
    /// Newest mtime of the directory itself and its immediate children.
    pub last_modified: SystemTime,
    /// Names of the immediate children (files and directories).
    pub contains_markers: BTreeSet<String>,
}

impl CandidateDirectory {
    /// Path components below the location root, e.g. `["CD Projekt Red", "Cyberpunk 2077"]`.
    pub fn components_below_location(&self) -> Vec<String> {
        let skip = self.location.relative_dir().len();
        self.relative_path
            .components()
            .skip(skip)
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect()
    }
}

/// The independent scoring rules. Each contributes at most once per candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ScoringRule {
    KeywordMatch,
    FormatMatch,
    Recency,
    KnownHint,
}

/// Why a candidate received (part of) its score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Reason {
    /// Game keywords found in the path or child names.
    KeywordMatch { matched: Vec<String>, total: usize },
    /// A child looks like a save file or save folder.
    FormatMatch { marker: String },
    /// Written to recently.
    Recency { age_days: u64 },
    /// Matches a curated known save path.
    KnownHint { pattern: String },
}

impl Reason {
    pub fn rule(&self) -> ScoringRule {
        match self {
            Reason::KeywordMatch { .. } => ScoringRule::KeywordMatch,
            Reason::FormatMatch { .. } => ScoringRule::FormatMatch,
            Reason::Recency { .. } => ScoringRule::Recency,
            Reason::KnownHint { .. } => ScoringRule::KnownHint,
        }
    }
}

impl std::fmt::Display for Reason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reason::KeywordMatch { matched, total } => {
                write!(f, "keywords {}/{} ({})", matched.len(), total, matched.join(", "))
            }
            Reason::FormatMatch { marker } => write!(f, "save-like entry '{marker}'"),
            Reason::Recency { age_days: 0 } => write!(f, "written today"),
            Reason::Recency { age_days } => write!(f, "written {age_days}d ago"),
            Reason::KnownHint { pattern } => write!(f, "known save path '{pattern}'"),
        }
    }
}

/// Where a candidate's confidence comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceLabel {
    Heuristic,
    KnownPathHint,
}

impl SourceLabel {
    /// Lower sorts first.
    pub fn sort_rank(&self) -> u8 {
        match self {
            SourceLabel::KnownPathHint => 0,
            SourceLabel::Heuristic => 1,
        }
    }
}

/// A candidate directory with its combined score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub path: PathBuf,
    pub library_root: PathBuf,
    pub location: SaveLocation,
    pub relative_path: PathBuf,
    pub score: f64,
    pub reasons: Vec<Reason>,
    pub source: SourceLabel,
    #[serde(skip)]
    pub last_modified: SystemTime,
}

impl ScoredCandidate {
    pub fn is_hinted(&self) -> bool {
        self.source == SourceLabel::KnownPathHint
    }

    pub fn has_rule(&self, rule: ScoringRule) -> bool {
        self.reasons.iter().any(|r| r.rule() == rule)
    }

    /// Depth of `path` below the filesystem root; shallower sorts first on ties.
    pub fn depth(&self) -> usize {
        crate::util::path_depth(&self.path)
    }
}
