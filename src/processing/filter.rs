//! Record filtering for [`TidyTable`].

use crate::types::{TidyRecord, TidyTable};

/// Constraint on the `year` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearFilter {
    /// `year == y`.
    Exact(i32),
    /// `min <= year <= max`. Matches nothing when `min > max`.
    Range { min: i32, max: i32 },
}

impl YearFilter {
    /// Returns `true` if `year` satisfies the constraint.
    pub fn contains(self, year: i32) -> bool {
        match self {
            Self::Exact(y) => year == y,
            Self::Range { min, max } => (min..=max).contains(&year),
        }
    }
}

/// Conjunction of optional constraints over the tidy columns.
///
/// Built once per interaction and never mutated; each builder method returns a new value.
/// An unset constraint matches every record.
///
/// ```rust
/// use unemployment_explorer::processing::FilterSpec;
///
/// let spec = FilterSpec::new()
///     .country("Spain")
///     .sex("Female")
///     .age_group("15-24")
///     .year_range(2016, 2020);
/// assert!(!spec.is_unconstrained());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSpec {
    countries: Option<Vec<String>>,
    sex: Option<String>,
    age_group: Option<String>,
    year: Option<YearFilter>,
}

impl FilterSpec {
    /// A spec with no constraints.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only `country`.
    pub fn country(self, country: impl Into<String>) -> Self {
        Self {
            countries: Some(vec![country.into()]),
            ..self
        }
    }

    /// Keep only records whose country is in `countries`. An empty list matches nothing.
    pub fn countries<I, S>(self, countries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            countries: Some(countries.into_iter().map(Into::into).collect()),
            ..self
        }
    }

    /// Keep only `sex`.
    pub fn sex(self, sex: impl Into<String>) -> Self {
        Self {
            sex: Some(sex.into()),
            ..self
        }
    }

    /// Keep only `age_group`.
    pub fn age_group(self, age_group: impl Into<String>) -> Self {
        Self {
            age_group: Some(age_group.into()),
            ..self
        }
    }

    /// Keep only `year`. Replaces any previous year constraint.
    pub fn year(self, year: i32) -> Self {
        Self {
            year: Some(YearFilter::Exact(year)),
            ..self
        }
    }

    /// Keep only years in `[min, max]`. Replaces any previous year constraint.
    pub fn year_range(self, min: i32, max: i32) -> Self {
        Self {
            year: Some(YearFilter::Range { min, max }),
            ..self
        }
    }

    /// The year constraint, if any.
    pub fn year_filter(&self) -> Option<YearFilter> {
        self.year
    }

    /// Returns `true` if no constraint is set.
    pub fn is_unconstrained(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `true` if `record` satisfies every constraint.
    pub fn matches(&self, record: &TidyRecord) -> bool {
        let key = &record.key;
        self.countries
            .as_ref()
            .is_none_or(|cs| cs.iter().any(|c| *c == key.country_name))
            && self.sex.as_ref().is_none_or(|s| *s == key.sex)
            && self.age_group.as_ref().is_none_or(|a| *a == key.age_group)
            && self.year.is_none_or(|y| y.contains(record.year))
    }
}

/// Iterate the records of `table` that match `spec`, in table order.
pub fn matching<'a>(
    table: &'a TidyTable,
    spec: &'a FilterSpec,
) -> impl Iterator<Item = &'a TidyRecord> + Clone {
    table.records.iter().filter(move |r| spec.matches(r))
}

/// Returns a new [`TidyTable`] containing only the records that match `spec`.
///
/// The result keeps the source's year bounds and record order.
pub fn filter(table: &TidyTable, spec: &FilterSpec) -> TidyTable {
    TidyTable::new(matching(table, spec).cloned().collect(), table.year_bounds())
}
