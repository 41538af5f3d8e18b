use thiserror::Error;

/// The reference catalog is not a sequence of `{appid, name}` pairs.
///
/// Fatal for the current run: no partial catalog is ever built from data
/// that produced this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("malformed catalog: {reason}")]
pub struct CatalogFormatError {
    pub reason: String,
}

impl CatalogFormatError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// The query was empty once punctuation and whitespace were stripped.
///
/// Only fatal for that query; the caller is expected to prompt again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("query {query:?} contains no searchable characters")]
pub struct NoMatchError {
    pub query: String,
}

impl NoMatchError {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
        }
    }
}
