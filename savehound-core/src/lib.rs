//! Shared types for savehound: the catalog/candidate data model, the save
//! locations inside a Proton prefix, core errors and text normalization.

pub mod error;
pub mod location;
pub mod types;
pub mod util;

pub use error::{CatalogFormatError, NoMatchError};
pub use location::SaveLocation;
pub use types::{
    CandidateDirectory, CatalogEntry, NameMatch, Reason, ScoredCandidate, ScoringRule,
    SourceLabel,
};
