//! Curated known save paths ("hints") and their YAML loading.
//!
//! Hints are optional: when none are configured every candidate is ranked
//! by heuristics alone.

pub mod types;
pub mod yaml;

pub use types::{HintSet, KnownPathHint};
pub use yaml::{HintError, hints_dir, load_hint_file, load_hints, load_hints_lenient};
