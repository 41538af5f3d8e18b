use thiserror::Error;

use savehound_core::NoMatchError;

/// Errors from the find pipeline.
#[derive(Debug, Error)]
pub enum FinderError {
    #[error(transparent)]
    NoMatch(#[from] NoMatchError),

    /// The picker returned an index outside the offered matches.
    #[error("Picked match {index} out of {count}")]
    InvalidPick { index: usize, count: usize },
}

/// Errors reading or writing `settings.toml`.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },

    #[error("Could not serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Malformed settings: {0}")]
    Malformed(String),
}

impl SettingsError {
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
