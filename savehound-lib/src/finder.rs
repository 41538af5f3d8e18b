//! The end-to-end pipeline: name → app id → candidates → ranked result.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use savehound_catalog::{CatalogIndex, NameMatcher};
use savehound_core::{CatalogEntry, NameMatch, NoMatchError, ScoredCandidate};
use savehound_hints::{HintSet, KnownPathHint};

use crate::error::FinderError;
use crate::ranker::{CandidateRanker, RankedResult};
use crate::scanner::{DirectoryScanner, ScanOptions};
use crate::scorer::{HeuristicScorer, ScoreWeights};

/// Chooses one of several name matches, usually by asking the user.
pub trait MatchPicker {
    /// Index into `matches`, or `None` to give up.
    fn pick(&mut self, matches: &[NameMatch]) -> Option<usize>;
}

/// Always takes the best match.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstMatch;

impl MatchPicker for FirstMatch {
    fn pick(&mut self, matches: &[NameMatch]) -> Option<usize> {
        if matches.is_empty() { None } else { Some(0) }
    }
}

/// The chosen game and its ranked save directory candidates.
#[derive(Debug, Clone)]
pub struct Located {
    pub entry: CatalogEntry,
    pub results: RankedResult,
}

/// Finds save directories for games across one or more `compatdata` roots.
#[derive(Debug, Clone)]
pub struct SaveFinder {
    roots: Vec<PathBuf>,
    scanner: DirectoryScanner,
    weights: ScoreWeights,
    matcher: NameMatcher,
    match_limit: Option<usize>,
    now: Option<SystemTime>,
}

impl SaveFinder {
    pub fn new(roots: Vec<PathBuf>, options: ScanOptions) -> Self {
        Self {
            roots,
            scanner: DirectoryScanner::new(options),
            weights: ScoreWeights::default(),
            matcher: NameMatcher::new(),
            match_limit: None,
            now: None,
        }
    }

    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Cap the number of name matches returned by [`search`](Self::search).
    pub fn with_match_limit(mut self, limit: usize) -> Self {
        self.match_limit = Some(limit);
        self
    }

    /// Pin the clock used for recency scoring.
    pub fn with_now(mut self, now: SystemTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Whether any root has a `{root}/{app_id}` directory.
    pub fn is_installed(&self, app_id: u32) -> bool {
        self.roots
            .iter()
            .any(|root| root.join(app_id.to_string()).is_dir())
    }

    /// App ids with a prefix directory under any root, read once per root.
    pub fn installed_app_ids(&self) -> HashSet<u32> {
        let mut ids = HashSet::new();
        for root in &self.roots {
            let Ok(entries) = fs::read_dir(root) else {
                log::debug!("Cannot read library root {}", root.display());
                continue;
            };
            ids.extend(
                entries
                    .flatten()
                    .filter(|e| e.path().is_dir())
                    .filter_map(|e| e.file_name().to_str()?.parse::<u32>().ok()),
            );
        }
        ids
    }

    /// Match `query` against the catalog.
    ///
    /// With `installed_only`, matches without a prefix under any root are
    /// dropped before the match limit is applied.
    pub fn search(
        &self,
        query: &str,
        catalog: &CatalogIndex,
        installed_only: bool,
    ) -> Result<Vec<NameMatch>, NoMatchError> {
        let mut matches = self.matcher.match_name(query, catalog)?;
        if installed_only {
            let installed = self.installed_app_ids();
            let before = matches.len();
            matches.retain(|m| installed.contains(&m.app_id));
            log::debug!("{} of {before} matches are installed", matches.len());
        }
        if let Some(limit) = self.match_limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    /// Scan, score and rank save directory candidates for one game.
    pub fn find(&self, entry: &CatalogEntry, hints: &HintSet) -> RankedResult {
        let app_hints = hints.for_app(entry.app_id);
        let mut scorer = HeuristicScorer::new(self.weights).with_hints(app_hints);
        if let Some(now) = self.now {
            scorer = scorer.with_now(now);
        }

        let mut scored = Vec::new();
        for root in &self.roots {
            scored.extend(self.find_in_root(root, entry, app_hints, &scorer));
        }
        CandidateRanker::rank(scored, app_hints)
    }

    fn find_in_root(
        &self,
        root: &Path,
        entry: &CatalogEntry,
        hints: &[KnownPathHint],
        scorer: &HeuristicScorer,
    ) -> Vec<ScoredCandidate> {
        let mut candidates = self.scanner.scan(root, entry.app_id);
        // Hinted directories deeper than the scan reaches
        for hinted in self.scanner.scan_hinted(root, entry.app_id, hints) {
            if !candidates.iter().any(|c| c.path == hinted.path) {
                candidates.push(hinted);
            }
        }
        candidates
            .iter()
            .map(|c| scorer.score(c, &entry.name))
            .collect()
    }

    /// Resolve `query` to a game with `picker`, then [`find`](Self::find) it.
    ///
    /// `Ok(None)` when nothing matched or the picker declined.
    pub fn locate(
        &self,
        query: &str,
        catalog: &CatalogIndex,
        hints: &HintSet,
        picker: &mut dyn MatchPicker,
        installed_only: bool,
    ) -> Result<Option<Located>, FinderError> {
        let matches = self.search(query, catalog, installed_only)?;
        if matches.is_empty() {
            return Ok(None);
        }

        let Some(index) = picker.pick(&matches) else {
            return Ok(None);
        };
        let picked = matches.get(index).ok_or(FinderError::InvalidPick {
            index,
            count: matches.len(),
        })?;

        let entry = CatalogEntry::new(picked.app_id, picked.name.clone());
        log::debug!("Locating saves for {} ({})", entry.name, entry.app_id);
        let results = self.find(&entry, hints);
        Ok(Some(Located { entry, results }))
    }
}

#[cfg(test)]
#[path = "tests/finder_tests.rs"]
mod tests;
