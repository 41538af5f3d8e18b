//! Heuristic scoring of candidate directories.
//!
//! Each rule looks at one kind of evidence and contributes at most once:
//!
//! | Rule           | Evidence                                         | Max contribution |
//! |----------------|--------------------------------------------------|------------------|
//! | `KeywordMatch` | game keywords in the path or child names         | `weights.keyword` |
//! | `FormatMatch`  | a child with a save-like extension or name       | `weights.format`  |
//! | `Recency`      | newest mtime within the recency horizon          | `weights.recency` |
//! | `KnownHint`    | path matches a curated hint for this app         | `max_score()`     |
//!
//! All scores are non-negative and bounded by [`ScoreWeights::max_score`].

use std::time::{Duration, SystemTime};

use serde::{Deserialize, Serialize};

use savehound_core::util::{keywords, normalize_text};
use savehound_core::{CandidateDirectory, Reason, ScoredCandidate, ScoringRule, SourceLabel};
use savehound_hints::KnownPathHint;

/// File extensions that usually mean save data.
pub const SAVE_EXTENSIONS: &[&str] = &[
    "sav", "save", "savegame", "sl2", "ess", "dat", "bak", "profile",
];

/// Name fragments that usually mean save data (`SaveGames`, `slot_01`, ...).
pub const SAVE_PATTERNS: &[&str] = &["save", "slot", "profile", "progress", "savedata"];

/// Full recency credit at or below this age.
pub const RECENT_WINDOW: Duration = Duration::from_secs(86_400);

/// No recency credit at or beyond this age.
pub const RECENCY_HORIZON: Duration = Duration::from_secs(30 * 86_400);

/// Keywords found only in child names earn this fraction of a path match.
const CHILD_NAME_CREDIT: f64 = 0.5;

/// The rules applied to every candidate, in reason order.
pub const HEURISTIC_RULES: [ScoringRule; 3] = [
    ScoringRule::KeywordMatch,
    ScoringRule::FormatMatch,
    ScoringRule::Recency,
];

/// Maximum contribution of each heuristic rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub keyword: f64,
    pub format: f64,
    pub recency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            keyword: 4.0,
            format: 2.0,
            recency: 3.0,
        }
    }
}

impl ScoreWeights {
    /// The best score any candidate can reach; also what a hinted candidate gets.
    pub fn max_score(&self) -> f64 {
        self.keyword + self.format + self.recency
    }

    /// Negative or non-finite weights are treated as zero.
    pub fn sanitized(self) -> Self {
        let clamp = |w: f64| if w.is_finite() && w > 0.0 { w } else { 0.0 };
        Self {
            keyword: clamp(self.keyword),
            format: clamp(self.format),
            recency: clamp(self.recency),
        }
    }
}

/// One rule's share of a candidate's score.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    pub points: f64,
    pub reason: Reason,
}

/// Scores candidates for one game against a fixed clock.
#[derive(Debug, Clone)]
pub struct HeuristicScorer {
    weights: ScoreWeights,
    now: SystemTime,
    hints: Vec<KnownPathHint>,
}

impl Default for HeuristicScorer {
    fn default() -> Self {
        Self::new(ScoreWeights::default())
    }
}

impl HeuristicScorer {
    pub fn new(weights: ScoreWeights) -> Self {
        Self {
            weights: weights.sanitized(),
            now: SystemTime::now(),
            hints: Vec::new(),
        }
    }

    /// Pin the clock recency is measured against.
    pub fn with_now(mut self, now: SystemTime) -> Self {
        self.now = now;
        self
    }

    /// Known save paths for the app being scored.
    pub fn with_hints(mut self, hints: &[KnownPathHint]) -> Self {
        self.hints = hints.to_vec();
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    /// Score one candidate for `game_name`.
    pub fn score(&self, candidate: &CandidateDirectory, game_name: &str) -> ScoredCandidate {
        let game_keywords = keywords(game_name);

        let mut score = 0.0;
        let mut reasons = Vec::new();
        for rule in HEURISTIC_RULES {
            if let Some(c) = self.evaluate(rule, candidate, &game_keywords) {
                score += c.points;
                reasons.push(c.reason);
            }
        }

        let mut source = SourceLabel::Heuristic;
        if let Some(hint) = self.evaluate(ScoringRule::KnownHint, candidate, &game_keywords) {
            score = hint.points;
            reasons.insert(0, hint.reason);
            source = SourceLabel::KnownPathHint;
        }

        ScoredCandidate {
            path: candidate.path.clone(),
            library_root: candidate.library_root.clone(),
            location: candidate.location,
            relative_path: candidate.relative_path.clone(),
            score,
            reasons,
            source,
            last_modified: candidate.last_modified,
        }
    }

    /// Apply a single rule. `None` means the rule found no evidence.
    pub fn evaluate(
        &self,
        rule: ScoringRule,
        candidate: &CandidateDirectory,
        game_keywords: &[String],
    ) -> Option<Contribution> {
        match rule {
            ScoringRule::KeywordMatch => {
                keyword_match(candidate, game_keywords, self.weights.keyword)
            }
            ScoringRule::FormatMatch => format_match(candidate, self.weights.format),
            ScoringRule::Recency => recency(candidate, self.now, self.weights.recency),
            ScoringRule::KnownHint => {
                known_hint(candidate, &self.hints, self.weights.max_score())
            }
        }
    }
}

/// Lowercased, punctuation-free and space-free form used for containment
/// checks, so `Cyberpunk2077` and `Cyberpunk 2077` compare equal.
fn compact(text: &str) -> String {
    normalize_text(text).replace(' ', "")
}

fn keyword_match(
    candidate: &CandidateDirectory,
    game_keywords: &[String],
    weight: f64,
) -> Option<Contribution> {
    if game_keywords.is_empty() || weight <= 0.0 {
        return None;
    }

    let path_evidence: Vec<String> = candidate
        .components_below_location()
        .iter()
        .map(|c| compact(c))
        .collect();
    let child_evidence: Vec<String> = candidate
        .contains_markers
        .iter()
        .map(|m| compact(m))
        .collect();

    let mut credit = 0.0;
    let mut matched = Vec::new();
    for kw in game_keywords {
        if path_evidence.iter().any(|e| e.contains(kw.as_str())) {
            credit += 1.0;
        } else if child_evidence.iter().any(|e| e.contains(kw.as_str())) {
            credit += CHILD_NAME_CREDIT;
        } else {
            continue;
        }
        matched.push(kw.clone());
    }

    if matched.is_empty() {
        return None;
    }
    let total = game_keywords.len();
    Some(Contribution {
        points: weight * credit / total as f64,
        reason: Reason::KeywordMatch { matched, total },
    })
}

/// Whether a file or folder name looks like save data.
pub fn is_save_like(name: &str) -> bool {
    let lower = name.to_lowercase();
    let has_save_ext = lower
        .rsplit_once('.')
        .is_some_and(|(stem, ext)| !stem.is_empty() && SAVE_EXTENSIONS.contains(&ext));
    has_save_ext || SAVE_PATTERNS.iter().any(|p| lower.contains(p))
}

fn format_match(candidate: &CandidateDirectory, weight: f64) -> Option<Contribution> {
    if weight <= 0.0 {
        return None;
    }
    let marker = candidate
        .contains_markers
        .iter()
        .find(|m| is_save_like(m))?;
    Some(Contribution {
        points: weight,
        reason: Reason::FormatMatch {
            marker: marker.clone(),
        },
    })
}

/// Recency credit for an age: full inside the window, linear decay to zero
/// at the horizon.
pub fn recency_factor(age: Duration) -> f64 {
    if age <= RECENT_WINDOW {
        1.0
    } else if age >= RECENCY_HORIZON {
        0.0
    } else {
        let span = (RECENCY_HORIZON - RECENT_WINDOW).as_secs_f64();
        (RECENCY_HORIZON - age).as_secs_f64() / span
    }
}

fn recency(candidate: &CandidateDirectory, now: SystemTime, weight: f64) -> Option<Contribution> {
    // Future timestamps (clock skew, restored backups) count as brand new
    let age = now
        .duration_since(candidate.last_modified)
        .unwrap_or(Duration::ZERO);
    let factor = recency_factor(age);
    if factor <= 0.0 || weight <= 0.0 {
        return None;
    }
    Some(Contribution {
        points: weight * factor,
        reason: Reason::Recency {
            age_days: age.as_secs() / 86_400,
        },
    })
}

fn known_hint(
    candidate: &CandidateDirectory,
    hints: &[KnownPathHint],
    max_score: f64,
) -> Option<Contribution> {
    let hint = hints.iter().find(|h| h.matches(&candidate.relative_path))?;
    Some(Contribution {
        points: max_score,
        reason: Reason::KnownHint {
            pattern: hint.path.clone(),
        },
    })
}

#[cfg(test)]
#[path = "tests/scorer_tests.rs"]
mod tests;
