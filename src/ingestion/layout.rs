//! Header resolution and cell parsing shared by the CSV and JSON loaders.

use std::fs::File;
use std::io;
use std::path::Path;

use crate::error::{ExplorerError, ExplorerResult};
use crate::types::{ID_COLUMNS, SeriesKey, YearColumn};

/// Where the identifier and year columns live in an input's header.
#[derive(Debug, Clone)]
pub(crate) struct WideLayout {
    /// Index of each [`ID_COLUMNS`] entry, in that order.
    pub id_idxs: [usize; 5],
    /// Year columns and their header indexes, in header order.
    pub years: Vec<(usize, YearColumn)>,
}

impl WideLayout {
    /// Locate the identifier columns (any order) and every 4-digit-year column.
    pub fn resolve<'a>(headers: impl IntoIterator<Item = &'a str>) -> ExplorerResult<Self> {
        let headers: Vec<&str> = headers.into_iter().map(str::trim).collect();

        let mut id_idxs = [0usize; 5];
        for (slot, name) in id_idxs.iter_mut().zip(ID_COLUMNS) {
            *slot = headers
                .iter()
                .position(|h| *h == name)
                .ok_or_else(|| ExplorerError::SchemaMismatch {
                    message: format!("missing required column '{name}'. headers={headers:?}"),
                })?;
        }

        let years: Vec<(usize, YearColumn)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| YearColumn::parse(h).map(|y| (idx, y)))
            .collect();
        if years.is_empty() {
            return Err(ExplorerError::SchemaMismatch {
                message: format!("no year columns (headers starting with a 4-digit year). headers={headers:?}"),
            });
        }

        Ok(Self { id_idxs, years })
    }

    /// Build a [`SeriesKey`] by looking up each identifier column with `get`.
    pub fn series_key<S: AsRef<str>>(&self, mut get: impl FnMut(usize) -> Option<S>) -> SeriesKey {
        let [country, indicator, sex, age_group, age_categories] = self
            .id_idxs
            .map(|idx| get(idx).map(|v| v.as_ref().trim().to_owned()).unwrap_or_default());
        SeriesKey {
            country_name: country,
            indicator_name: indicator,
            sex,
            age_group,
            age_categories,
        }
    }
}

/// Outcome of reading one rate cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum RateCell {
    Present(f64),
    Empty,
    /// Unparseable, NaN/infinite, or outside `[0, 100]`. Treated as absent.
    Malformed,
}

impl RateCell {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Present(v) => Some(v),
            Self::Empty | Self::Malformed => None,
        }
    }
}

/// Parse a textual rate cell.
pub(crate) fn parse_rate(raw: &str) -> RateCell {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return RateCell::Empty;
    }
    match trimmed.parse::<f64>() {
        Ok(v) => check_rate(v),
        Err(_) => RateCell::Malformed,
    }
}

/// Validate a numeric rate: a percentage must be finite and within `[0, 100]`.
pub(crate) fn check_rate(v: f64) -> RateCell {
    if v.is_finite() && (0.0..=100.0).contains(&v) {
        RateCell::Present(v)
    } else {
        RateCell::Malformed
    }
}

/// Open an input file, mapping a missing file to [`ExplorerError::NotFound`].
pub(crate) fn open_input(path: &Path) -> ExplorerResult<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ExplorerError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ExplorerError::Io(e),
    })
}
