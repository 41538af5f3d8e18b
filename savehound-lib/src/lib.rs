//! Save directory discovery for Steam games running under Proton.
//!
//! [`SaveFinder`] ties the pieces together: the catalog name matcher picks an
//! app id, [`DirectoryScanner`] lists candidate directories inside the app's
//! prefix, [`HeuristicScorer`] scores each one and [`CandidateRanker`] merges
//! and orders them.

pub mod error;
pub mod finder;
pub mod ranker;
pub mod scanner;
pub mod scorer;
pub mod settings;

pub use error::{FinderError, SettingsError};
pub use finder::{FirstMatch, Located, MatchPicker, SaveFinder};
pub use ranker::{CandidateRanker, RankedResult};
pub use scanner::{DirectoryScanner, ScanOptions};
pub use scorer::{HeuristicScorer, ScoreWeights};
pub use settings::Settings;

