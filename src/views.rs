//! Query presets for the dashboard and analyzer views.
//!
//! Each function builds the [`FilterSpec`] / [`Aggregation`] a view needs and runs
//! [`query`]. Views that explore one series over time expect a table melted with
//! [`crate::processing::CleaningPolicy::KeepMissing`]; the others expect
//! [`crate::processing::CleaningPolicy::DropMissing`].

use crate::processing::{Aggregation, FilterSpec, GroupOp, Histogram, histogram};
use crate::query::{ResultTable, query};
use crate::types::{Dimension, TidyTable};

/// Age group compared on the y axis of the youth-vs-adult view.
pub const YOUTH_AGE_GROUP: &str = "15-24";
/// Age group compared on the x axis of the youth-vs-adult view.
pub const ADULT_AGE_GROUP: &str = "25+";

/// Rate per year for one series, in year order. Absent years stay in the result.
pub fn trend(table: &TidyTable, country: &str, sex: &str, age_group: &str) -> ResultTable {
    let spec = FilterSpec::new().country(country).sex(sex).age_group(age_group);
    query(table, &spec, None)
}

/// The `n` highest rates for `year`, `sex` and `age_group`.
pub fn country_ranking(table: &TidyTable, year: i32, sex: &str, age_group: &str, n: usize) -> ResultTable {
    let spec = FilterSpec::new().year(year).sex(sex).age_group(age_group);
    query(table, &spec, Some(&Aggregation::top_n(n)))
}

/// Side-by-side rates of the selected `countries`.
pub fn country_comparison<I, S>(table: &TidyTable, year: i32, sex: &str, age_group: &str, countries: I) -> ResultTable
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let spec = FilterSpec::new()
        .year(year)
        .sex(sex)
        .age_group(age_group)
        .countries(countries);
    query(table, &spec, None)
}

/// Summed rates for one country and year, broken down by `by` (sex or age group).
pub fn breakdown(table: &TidyTable, country: &str, year: i32, by: Dimension) -> ResultTable {
    let spec = FilterSpec::new().country(country).year(year);
    query(table, &spec, Some(&Aggregation::group(by, GroupOp::Sum)))
}

/// Mean rate per country for `year` across every sex and age group (choropleth view).
pub fn average_map(table: &TidyTable, year: i32) -> ResultTable {
    query(table, &FilterSpec::new().year(year), Some(&Aggregation::mean_by_country()))
}

/// Mean youth and adult rate per country for `year`.
pub fn youth_vs_adult(table: &TidyTable, year: i32) -> ResultTable {
    query(
        table,
        &FilterSpec::new().year(year),
        Some(&Aggregation::pair_merge(YOUTH_AGE_GROUP, ADULT_AGE_GROUP)),
    )
}

/// Histogram of every rate recorded for `year`.
pub fn distribution(table: &TidyTable, year: i32, bins: usize) -> Histogram {
    let result = query(table, &FilterSpec::new().year(year), None);
    let rates = result.records().unwrap_or_default().iter().map(|r| r.unemployment_rate);
    histogram(rates, bins)
}

/// Default year for the map: the second-to-last year, which tends to be more complete than the
/// last one.
pub fn default_map_year(table: &TidyTable) -> Option<i32> {
    table.year_bounds().map(|(min, max)| (max - 1).max(min))
}

#[cfg(test)]
mod tests {
    use super::{breakdown, default_map_year, distribution, trend, youth_vs_adult};
    use crate::processing::{CleaningPolicy, melt};
    use crate::types::{Dimension, RawRecord, RawTable, SeriesKey, TidyTable, YearColumn};

    fn sample(policy: CleaningPolicy) -> TidyTable {
        let years = ["2022", "2023", "2024"].iter().filter_map(|h| YearColumn::parse(h)).collect();
        let row = |country: &str, sex: &str, age: &str, rates: [Option<f64>; 3]| RawRecord {
            key: SeriesKey::new(country, "Unemployment rate", sex, age, "Youth"),
            rates: rates.to_vec(),
        };
        let raw = RawTable::new(
            years,
            vec![
                row("Italy", "Female", "15-24", [Some(30.0), None, Some(20.0)]),
                row("Italy", "Male", "15-24", [Some(26.0), Some(22.0), None]),
                row("Italy", "Female", "25+", [Some(9.0), Some(8.0), None]),
            ],
        );
        melt(&raw, policy)
    }

    #[test]
    fn trend_reports_missing_years_when_kept() {
        let t = sample(CleaningPolicy::KeepMissing);
        let out = trend(&t, "Italy", "Female", "15-24");
        let points: Vec<(i32, Option<f64>)> = out
            .records()
            .unwrap()
            .iter()
            .map(|r| (r.year, r.unemployment_rate))
            .collect();
        assert_eq!(points, vec![(2022, Some(30.0)), (2023, None), (2024, Some(20.0))]);
    }

    #[test]
    fn breakdown_sums_by_dimension() {
        let t = sample(CleaningPolicy::DropMissing);
        let out = breakdown(&t, "Italy", 2022, Dimension::Sex);
        let got: Vec<(&str, Option<f64>)> =
            out.groups().unwrap().iter().map(|g| (g.key.as_str(), g.value)).collect();
        assert_eq!(got, vec![("Female", Some(39.0)), ("Male", Some(26.0))]);
    }

    #[test]
    fn youth_vs_adult_uses_mean_of_each_age_group() {
        let t = sample(CleaningPolicy::DropMissing);
        let out = youth_vs_adult(&t, 2022);
        let pairs = out.pairs().unwrap();
        assert_eq!(pairs.len(), 1);
        assert_eq!((pairs[0].a, pairs[0].b), (28.0, 9.0));

        assert!(youth_vs_adult(&t, 2024).is_empty());
    }

    #[test]
    fn distribution_and_default_year() {
        let t = sample(CleaningPolicy::DropMissing);
        assert_eq!(distribution(&t, 2023, 30).total(), 2);
        assert_eq!(default_map_year(&t), Some(2023));
    }
}
