use std::path::PathBuf;

use crate::error::ExplorerError;

use super::unified::TableFormat;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (load failed).
    Error,
    /// Critical error (missing file or other I/O failure).
    Critical,
}

impl LoadSeverity {
    /// Classify a load error.
    pub fn for_error(e: &ExplorerError) -> Self {
        match e {
            ExplorerError::NotFound { .. } | ExplorerError::Io(_) => Self::Critical,
            ExplorerError::Csv(err) => match err.kind() {
                ::csv::ErrorKind::Io(_) => Self::Critical,
                _ => Self::Error,
            },
            ExplorerError::Json(_) | ExplorerError::SchemaMismatch { .. } => Self::Error,
        }
    }
}

/// Context about a load attempt.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// The input path.
    pub path: PathBuf,
    /// Format used to read it.
    pub format: TableFormat,
}

/// Stats reported on a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Number of wide rows read.
    pub rows: usize,
    /// Number of year columns found in the header.
    pub year_columns: usize,
}

/// Observer interface for load outcomes.
///
/// Implementors can record metrics, logs, or trigger alerts.
pub trait LoadObserver: Send + Sync {
    /// Called when a file was read successfully.
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when a cached table was returned without reading the file.
    fn on_cache_hit(&self, _ctx: &LoadContext) {}

    /// Called when a load fails.
    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &ExplorerError) {}

    /// Called when a load failure meets the alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_failure`].
    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &ExplorerError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards load events to the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(
            "loaded format={:?} path={} rows={} year_columns={}",
            ctx.format,
            ctx.path.display(),
            stats.rows,
            stats.year_columns
        );
    }

    fn on_cache_hit(&self, ctx: &LoadContext) {
        log::debug!("cache hit path={}", ctx.path.display());
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &ExplorerError) {
        log::error!(
            "load failed severity={:?} format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &ExplorerError) {
        log::error!(
            "[ALERT] load failed severity={:?} format={:?} path={} err={}",
            severity,
            ctx.format,
            ctx.path.display(),
            error
        );
    }
}
