//! Load entrypoints and implementations.
//!
//! Most callers should use [`load`] / [`load_tidy`], which:
//!
//! - read the file once per path per process (see [`TableCache`])
//! - auto-detect the format by file extension (or honor [`LoadOptions::format`])
//! - report success/failure/alerts to an optional [`LoadObserver`]
//!
//! Format-specific functions are also available under [`csv`] and [`json`].

use std::path::Path;
use std::sync::Arc;

use crate::error::ExplorerResult;
use crate::processing::CleaningPolicy;
use crate::types::{RawTable, TidyTable};

pub mod cache;
pub mod csv;
pub mod json;
mod layout;
pub mod observability;
pub mod unified;

pub use cache::TableCache;
pub use observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats, LogObserver};
pub use unified::{LoadOptions, TableFormat, load_from_path};

/// Load the wide table at `path` through the process-wide cache.
///
/// Fails with [`crate::ExplorerError::NotFound`] if the file does not exist.
pub fn load(path: impl AsRef<Path>) -> ExplorerResult<Arc<RawTable>> {
    TableCache::global().load(path, &LoadOptions::default())
}

/// Load `path` through the process-wide cache and reshape it with `policy`.
pub fn load_tidy(path: impl AsRef<Path>, policy: CleaningPolicy) -> ExplorerResult<Arc<TidyTable>> {
    TableCache::global().load_tidy(path, policy, &LoadOptions::default())
}
