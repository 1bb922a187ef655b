//! Unified load entrypoint.
//!
//! [`load_from_path`] reads a file into a [`RawTable`] without caching:
//!
//! - If [`LoadOptions::format`] is `None`, the format is inferred from the file extension
//!   (`.json`/`.ndjson` → JSON, anything else → delimited text, tab-separated for `.tsv`).
//! - If a [`LoadObserver`] is configured, success/failure/alerts are reported to it.
//!
//! Most callers want the cached [`super::load`] instead.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::ExplorerResult;
use crate::types::RawTable;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats};
use super::{csv, json};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableFormat {
    /// Delimited text with a header row.
    Csv,
    /// JSON array of row objects, or NDJSON.
    Json,
}

impl TableFormat {
    /// Infer a format from a path's extension (case-insensitive). Defaults to [`Self::Csv`].
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" | "ndjson" => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Options controlling how a file is loaded.
///
/// Use [`Default`] for the common case: format by extension, comma delimiter, no observer.
#[derive(Clone)]
pub struct LoadOptions {
    /// If `None`, infer the format from the file extension.
    pub format: Option<TableFormat>,
    /// Delimiter for [`TableFormat::Csv`]. If `None`, tab for `.tsv` and comma otherwise.
    pub delimiter: Option<u8>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("format", &self.format)
            .field("delimiter", &self.delimiter.map(char::from))
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            format: None,
            delimiter: None,
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// The format that will be used for `path`.
    pub fn format_for(&self, path: &Path) -> TableFormat {
        self.format.unwrap_or_else(|| TableFormat::from_path(path))
    }

    pub(crate) fn delimiter_for(&self, path: &Path) -> u8 {
        self.delimiter.unwrap_or_else(|| {
            let is_tsv = path
                .extension()
                .and_then(|s| s.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("tsv"));
            if is_tsv { b'\t' } else { b',' }
        })
    }

    pub(crate) fn context(&self, path: &Path) -> LoadContext {
        LoadContext {
            path: path.to_path_buf(),
            format: self.format_for(path),
        }
    }
}

/// Read `path` into a [`RawTable`], bypassing the cache.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row and year-column counts
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use std::sync::Arc;
///
/// use unemployment_explorer::ingestion::{load_from_path, LoadOptions, LogObserver};
///
/// # fn main() -> Result<(), unemployment_explorer::ExplorerError> {
/// let opts = LoadOptions {
///     observer: Some(Arc::new(LogObserver)),
///     ..Default::default()
/// };
/// let raw = load_from_path("global_unemployment_data.csv", &opts)?;
/// println!("rows={} years={:?}", raw.row_count(), raw.year_bounds());
/// # Ok(())
/// # }
/// ```
pub fn load_from_path(path: impl AsRef<Path>, options: &LoadOptions) -> ExplorerResult<RawTable> {
    let path = path.as_ref();
    let ctx = options.context(path);

    let result = match ctx.format {
        TableFormat::Csv => csv::load_csv_from_path(path, options.delimiter_for(path)),
        TableFormat::Json => json::load_json_from_path(path),
    };

    match &result {
        Ok(raw) => {
            let stats = LoadStats {
                rows: raw.row_count(),
                year_columns: raw.year_count(),
            };
            log::info!(
                "read {} rows x {} year columns from {}",
                stats.rows,
                stats.year_columns,
                path.display()
            );
            if let Some(obs) = options.observer.as_ref() {
                obs.on_success(&ctx, stats);
            }
        }
        Err(e) => {
            if let Some(obs) = options.observer.as_ref() {
                let sev = LoadSeverity::for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{LoadOptions, TableFormat};

    #[test]
    fn format_is_inferred_from_extension() {
        assert_eq!(TableFormat::from_path(Path::new("a.json")), TableFormat::Json);
        assert_eq!(TableFormat::from_path(Path::new("a.NDJSON")), TableFormat::Json);
        assert_eq!(TableFormat::from_path(Path::new("a.csv")), TableFormat::Csv);
        assert_eq!(TableFormat::from_path(Path::new("no_extension")), TableFormat::Csv);
    }

    #[test]
    fn delimiter_follows_extension_unless_overridden() {
        let opts = LoadOptions::default();
        assert_eq!(opts.delimiter_for(Path::new("a.tsv")), b'\t');
        assert_eq!(opts.delimiter_for(Path::new("a.csv")), b',');

        let opts = LoadOptions {
            delimiter: Some(b';'),
            ..Default::default()
        };
        assert_eq!(opts.delimiter_for(Path::new("a.tsv")), b';');
    }
}
