//! Merging and ordering of scored candidates.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::PathBuf;

use serde::Serialize;

use savehound_core::util::normalize_path;
use savehound_core::{Reason, ScoredCandidate, ScoringRule, SourceLabel};
use savehound_hints::KnownPathHint;

/// Ranked candidates, best first.
///
/// Hinted candidates come before heuristic ones. Within a label, scores are
/// non-increasing; ties go to the shallower path, then lexical path order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RankedResult {
    candidates: Vec<ScoredCandidate>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn first(&self) -> Option<&ScoredCandidate> {
        self.candidates.first()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredCandidate> {
        self.candidates.iter()
    }

    pub fn as_slice(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    /// Number of candidates backed by a known path hint.
    pub fn hinted_count(&self) -> usize {
        self.candidates.iter().filter(|c| c.is_hinted()).count()
    }

    pub fn into_vec(self) -> Vec<ScoredCandidate> {
        self.candidates
    }
}

impl IntoIterator for RankedResult {
    type Item = ScoredCandidate;
    type IntoIter = std::vec::IntoIter<ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.into_iter()
    }
}

impl<'a> IntoIterator for &'a RankedResult {
    type Item = &'a ScoredCandidate;
    type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.candidates.iter()
    }
}

/// Orders scored candidates from every library root into one result.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateRanker;

impl CandidateRanker {
    /// Merge duplicates, apply hint labels and sort.
    ///
    /// Candidates that refer to the same directory (after lexical path
    /// normalization) are merged: scores add up, reasons are unioned and the
    /// hint label wins. A candidate whose relative path matches one of `hints`
    /// is labelled [`SourceLabel::KnownPathHint`] even if its scorer had no
    /// hints. Every hinted score is lifted to at least the best heuristic score.
    pub fn rank(scored: Vec<ScoredCandidate>, hints: &[KnownPathHint]) -> RankedResult {
        let mut merged: Vec<ScoredCandidate> = Vec::with_capacity(scored.len());
        let mut index: HashMap<PathBuf, usize> = HashMap::new();

        for mut candidate in scored {
            let key = normalize_path(&candidate.path);
            match index.get(&key) {
                Some(&i) => merge_into(&mut merged[i], candidate),
                None => {
                    candidate.path = key.clone();
                    index.insert(key, merged.len());
                    merged.push(candidate);
                }
            }
        }

        for candidate in &mut merged {
            if candidate.is_hinted() {
                continue;
            }
            if let Some(hint) = hints.iter().find(|h| h.matches(&candidate.relative_path)) {
                candidate.source = SourceLabel::KnownPathHint;
                candidate.reasons.insert(
                    0,
                    Reason::KnownHint {
                        pattern: hint.path.clone(),
                    },
                );
            }
        }

        let best_heuristic = merged
            .iter()
            .filter(|c| !c.is_hinted())
            .map(|c| c.score)
            .fold(0.0_f64, f64::max);
        for candidate in merged.iter_mut().filter(|c| c.is_hinted()) {
            candidate.score = candidate.score.max(best_heuristic);
            // Stable: hint reasons first, the rest keep their order
            candidate
                .reasons
                .sort_by_key(|r| r.rule() != ScoringRule::KnownHint);
        }

        merged.sort_by(compare);
        RankedResult { candidates: merged }
    }
}

fn merge_into(target: &mut ScoredCandidate, other: ScoredCandidate) {
    target.score += other.score;
    target.last_modified = target.last_modified.max(other.last_modified);
    if other.is_hinted() {
        target.source = SourceLabel::KnownPathHint;
    }
    for reason in other.reasons {
        if !target.reasons.contains(&reason) {
            target.reasons.push(reason);
        }
    }
}

fn compare(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    a.source
        .sort_rank()
        .cmp(&b.source.sort_rank())
        .then_with(|| b.score.total_cmp(&a.score))
        .then_with(|| a.depth().cmp(&b.depth()))
        .then_with(|| a.path.cmp(&b.path))
}

#[cfg(test)]
#[path = "tests/ranker_tests.rs"]
mod tests;
