//! The Steam app catalog: in-memory index, name matching, and the on-disk
//! cache of the downloaded app list.

pub mod cache;
pub mod error;
pub mod index;
pub mod matcher;

pub use cache::{
    AppListCache, AppListSource, CacheStatus, RefreshPolicy, STALE_AFTER, SteamWebApi,
    load_catalog_file,
};
pub use error::CatalogError;
pub use index::CatalogIndex;
pub use matcher::{NameMatcher, match_name};
