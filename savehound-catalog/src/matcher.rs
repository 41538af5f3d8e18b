//! Free-text name matching against the catalog.
//!
//! Matching is deliberately simple and deterministic:
//! 1. Substring containment on normalized text (similarity 1.0)
//! 2. Order-independent token overlap as a fallback for partial matches
//!
//! Normalization lowercases and strips punctuation, so `"baldurs gate"` does
//! not contain `"baldur's gate"` but both share the tokens `baldur` and `gate`.

use std::cmp::Ordering;
use std::collections::HashSet;

use savehound_core::util::normalize_text;
use savehound_core::{CatalogEntry, NameMatch, NoMatchError};

use crate::index::CatalogIndex;

/// Ranks catalog entries against a query.
#[derive(Debug, Clone, Copy, Default)]
pub struct NameMatcher {
    limit: Option<usize>,
}

impl NameMatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the first `limit` matches after sorting.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Match `query` against every entry in `catalog`.
    ///
    /// Returns matches with similarity > 0, best first. Ties are broken by
    /// shorter name, then lexical name order, then catalog order. An empty
    /// `Vec` means a well-formed query matched nothing; only a query with
    /// no alphanumeric characters is an error.
    pub fn match_name(
        &self,
        query: &str,
        catalog: &CatalogIndex,
    ) -> Result<Vec<NameMatch>, NoMatchError> {
        let normalized = normalize_text(query);
        if normalized.is_empty() {
            return Err(NoMatchError::new(query));
        }

        let mut query_tokens: Vec<&str> = Vec::new();
        for t in normalized.split(' ') {
            if !query_tokens.contains(&t) {
                query_tokens.push(t);
            }
        }

        let mut matches: Vec<NameMatch> = catalog
            .all_entries()
            .filter_map(|entry| {
                let similarity = similarity(&normalized, &query_tokens, entry);
                (similarity > 0.0).then(|| NameMatch {
                    app_id: entry.app_id,
                    name: entry.name.clone(),
                    similarity,
                })
            })
            .collect();

        // sort_by is stable: identical names keep catalog order
        matches.sort_by(compare_matches);

        if let Some(limit) = self.limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }
}

/// Match with default settings (no limit).
pub fn match_name(query: &str, catalog: &CatalogIndex) -> Result<Vec<NameMatch>, NoMatchError> {
    NameMatcher::new().match_name(query, catalog)
}

/// Similarity of one entry to an already-normalized query.
fn similarity(normalized_query: &str, query_tokens: &[&str], entry: &CatalogEntry) -> f64 {
    let name = normalize_text(&entry.name);
    if name.contains(normalized_query) {
        return 1.0;
    }

    let name_tokens: HashSet<&str> = name.split(' ').collect();
    let hits = query_tokens
        .iter()
        .filter(|t| name_tokens.contains(*t))
        .count();
    hits as f64 / query_tokens.len() as f64
}

fn compare_matches(a: &NameMatch, b: &NameMatch) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| a.name.chars().count().cmp(&b.name.chars().count()))
        .then_with(|| a.name.cmp(&b.name))
}

#[cfg(test)]
#[path = "tests/matcher_tests.rs"]
mod tests;
