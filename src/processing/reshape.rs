//! Wide-to-long reshaping of a [`RawTable`].

use crate::types::{RawTable, TidyRecord, TidyTable};

/// What to do with tidy records whose rate is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CleaningPolicy {
    /// Drop records without a rate (dashboard views).
    #[default]
    DropMissing,
    /// Keep records without a rate so "no data" can be shown explicitly (trend exploration).
    KeepMissing,
}

/// Reshape wide year columns into one [`TidyRecord`] per `(row, year column)`.
///
/// Records are emitted year-major: every row for the first year column, then every row for the
/// next. With [`CleaningPolicy::KeepMissing`] the output has exactly
/// `raw.row_count() * raw.year_count()` records.
pub fn melt(raw: &RawTable, policy: CleaningPolicy) -> TidyTable {
    let mut records = Vec::with_capacity(raw.row_count() * raw.year_count());
    for (col, year) in raw.years.iter().enumerate() {
        for row in &raw.records {
            let rate = row.rates.get(col).copied().flatten();
            if rate.is_none() && policy == CleaningPolicy::DropMissing {
                continue;
            }
            records.push(TidyRecord {
                key: row.key.clone(),
                year: year.year,
                unemployment_rate: rate,
            });
        }
    }
    TidyTable::new(records, raw.year_bounds())
}

#[cfg(test)]
mod tests {
    use super::{CleaningPolicy, melt};
    use crate::types::{RawRecord, RawTable, SeriesKey, YearColumn};

    fn sample_raw() -> RawTable {
        let years = ["2014", "2015", "2016"]
            .iter()
            .filter_map(|h| YearColumn::parse(h))
            .collect();
        let key = |country: &str| SeriesKey::new(country, "Unemployment rate", "Total", "15-24", "Youth");
        RawTable::new(
            years,
            vec![
                RawRecord {
                    key: key("Chad"),
                    rates: vec![Some(1.0), None, Some(3.0)],
                },
                RawRecord {
                    key: key("Peru"),
                    rates: vec![Some(4.0), Some(5.0), None],
                },
            ],
        )
    }

    #[test]
    fn melt_keep_missing_emits_rows_times_years() {
        let raw = sample_raw();
        let tidy = melt(&raw, CleaningPolicy::KeepMissing);

        assert_eq!(tidy.row_count(), raw.row_count() * raw.year_count());
        assert_eq!(tidy.year_bounds(), Some((2014, 2016)));

        let cells: Vec<(&str, i32, Option<f64>)> = tidy
            .records
            .iter()
            .map(|r| (r.key.country_name.as_str(), r.year, r.unemployment_rate))
            .collect();
        assert_eq!(
            cells,
            vec![
                ("Chad", 2014, Some(1.0)),
                ("Peru", 2014, Some(4.0)),
                ("Chad", 2015, None),
                ("Peru", 2015, Some(5.0)),
                ("Chad", 2016, Some(3.0)),
                ("Peru", 2016, None),
            ]
        );
    }

    #[test]
    fn melt_drop_missing_removes_absent_rates_only() {
        let raw = sample_raw();
        let tidy = melt(&raw, CleaningPolicy::DropMissing);

        assert_eq!(tidy.row_count(), 4);
        assert!(tidy.records.iter().all(|r| r.unemployment_rate.is_some()));
        // Bounds still describe the source columns.
        assert_eq!(tidy.year_bounds(), Some((2014, 2016)));
    }

    #[test]
    fn melt_of_empty_table_is_empty() {
        let raw = RawTable::new(YearColumn::parse("2020").into_iter().collect(), Vec::new());
        let tidy = melt(&raw, CleaningPolicy::KeepMissing);
        assert!(tidy.is_empty());
        assert_eq!(tidy.year_bounds(), Some((2020, 2020)));
    }
}
