//! Core data model types.
//!
//! The loader produces a wide [`RawTable`] (one value per year column); the reshaper turns it
//! into a long [`TidyTable`] with one [`TidyRecord`] per `(series, year)`.

use std::borrow::Cow;
use std::collections::HashSet;

use serde::Serialize;

/// Identifier columns every input file must provide, in canonical order.
pub const ID_COLUMNS: [&str; 5] = [
    "country_name",
    "indicator_name",
    "sex",
    "age_group",
    "age_categories",
];

/// A column of the tidy table that records can be filtered or grouped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// `country_name`.
    Country,
    /// `indicator_name`.
    Indicator,
    /// `sex`.
    Sex,
    /// `age_group` (e.g. `15-24`, `25+`).
    AgeGroup,
    /// `age_categories` (e.g. `Youth`, `Adults`).
    AgeCategories,
    /// `year`.
    Year,
}

impl Dimension {
    /// Column name as it appears in the input file / tidy output.
    pub fn column_name(self) -> &'static str {
        match self {
            Self::Country => "country_name",
            Self::Indicator => "indicator_name",
            Self::Sex => "sex",
            Self::AgeGroup => "age_group",
            Self::AgeCategories => "age_categories",
            Self::Year => "year",
        }
    }
}

/// The identifier part of a row: which series a rate belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SeriesKey {
    pub country_name: String,
    pub indicator_name: String,
    pub sex: String,
    pub age_group: String,
    pub age_categories: String,
}

impl SeriesKey {
    /// Build a key from the five identifier values in [`ID_COLUMNS`] order.
    pub fn new(
        country_name: impl Into<String>,
        indicator_name: impl Into<String>,
        sex: impl Into<String>,
        age_group: impl Into<String>,
        age_categories: impl Into<String>,
    ) -> Self {
        Self {
            country_name: country_name.into(),
            indicator_name: indicator_name.into(),
            sex: sex.into(),
            age_group: age_group.into(),
            age_categories: age_categories.into(),
        }
    }
}

/// A year column header and the year parsed from its 4-digit prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearColumn {
    /// Header text as found in the input.
    pub label: String,
    /// Year parsed from the first four characters of `label`.
    pub year: i32,
}

impl YearColumn {
    /// Parse a header into a year column.
    ///
    /// Returns `None` unless the header starts with four ASCII digits.
    pub fn parse(label: &str) -> Option<Self> {
        let prefix = label.trim().get(..4)?;
        if !prefix.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let year = prefix.parse::<i32>().ok()?;
        Some(Self {
            label: label.trim().to_owned(),
            year,
        })
    }
}

/// One wide input row: a series key and one optional rate per year column.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub key: SeriesKey,
    /// Values aligned with [`RawTable::years`]. `None` means absent.
    pub rates: Vec<Option<f64>>,
}

/// The wide table as loaded from disk.
#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Year columns in header order.
    pub years: Vec<YearColumn>,
    /// Rows in file order.
    pub records: Vec<RawRecord>,
}

impl RawTable {
    /// Create a table from year columns and records.
    ///
    /// # Panics
    ///
    /// Panics if any record's `rates` length differs from `years.len()`.
    pub fn new(years: Vec<YearColumn>, records: Vec<RawRecord>) -> Self {
        for r in &records {
            assert!(
                r.rates.len() == years.len(),
                "record has {} rates but table has {} year columns",
                r.rates.len(),
                years.len()
            );
        }
        Self { years, records }
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Number of year columns.
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Smallest and largest year found in the headers, or `None` without year columns.
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        let min = self.years.iter().map(|y| y.year).min()?;
        let max = self.years.iter().map(|y| y.year).max()?;
        Some((min, max))
    }

    /// Values of year column `idx` across all rows, in row order.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = Option<f64>> + '_ {
        self.records
            .iter()
            .map(move |r| r.rates.get(idx).copied().flatten())
    }
}

/// One long-format row: a series, a year, and the rate for that year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TidyRecord {
    #[serde(flatten)]
    pub key: SeriesKey,
    pub year: i32,
    /// Percentage in `[0, 100]`, or `None` when the source had no usable value.
    pub unemployment_rate: Option<f64>,
}

impl TidyRecord {
    /// The value of `dimension` for this record, as text.
    pub fn dimension_value(&self, dimension: Dimension) -> Cow<'_, str> {
        match dimension {
            Dimension::Country => Cow::Borrowed(&self.key.country_name),
            Dimension::Indicator => Cow::Borrowed(&self.key.indicator_name),
            Dimension::Sex => Cow::Borrowed(&self.key.sex),
            Dimension::AgeGroup => Cow::Borrowed(&self.key.age_group),
            Dimension::AgeCategories => Cow::Borrowed(&self.key.age_categories),
            Dimension::Year => Cow::Owned(self.year.to_string()),
        }
    }
}

/// The long-format table every dashboard query runs against.
#[derive(Debug, Clone, PartialEq)]
pub struct TidyTable {
    pub records: Vec<TidyRecord>,
    year_bounds: Option<(i32, i32)>,
}

impl TidyTable {
    /// Create a tidy table. `year_bounds` are the bounds of the source's year columns.
    pub fn new(records: Vec<TidyRecord>, year_bounds: Option<(i32, i32)>) -> Self {
        Self {
            records,
            year_bounds,
        }
    }

    /// Number of records.
    pub fn row_count(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if there are no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Year range of the source headers (kept even if cleaning dropped every record of a year).
    pub fn year_bounds(&self) -> Option<(i32, i32)> {
        self.year_bounds
    }

    /// Distinct values of `dimension`, in first-seen order.
    ///
    /// Used to populate selectors; callers sort as the view requires.
    pub fn distinct(&self, dimension: Dimension) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for r in &self.records {
            let v = r.dimension_value(dimension);
            if seen.insert(v.clone().into_owned()) {
                out.push(v.into_owned());
            }
        }
        out
    }
}
