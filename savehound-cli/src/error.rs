use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// App list could not be loaded, cached or downloaded
    #[error("Catalog error: {0}")]
    Catalog(#[from] savehound_catalog::CatalogError),

    /// Query normalized to nothing
    #[error("{0}")]
    NoMatch(#[from] savehound_core::NoMatchError),

    /// Find pipeline failed
    #[error("{0}")]
    Finder(#[from] savehound_lib::FinderError),

    /// Settings file could not be read or written
    #[error("Settings error: {0}")]
    Settings(#[from] savehound_lib::SettingsError),

    /// JSON output failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
