use unemployment_explorer::ingestion::{LoadOptions, TableCache};
use unemployment_explorer::processing::{Aggregation, CleaningPolicy, FilterSpec, correlate, melt};
use unemployment_explorer::query::query;
use unemployment_explorer::types::{Dimension, TidyTable};
use unemployment_explorer::views::{
    average_map, country_comparison, country_ranking, default_map_year, distribution, trend, youth_vs_adult,
};

const FIXTURE: &str = "tests/fixtures/unemployment.csv";

fn tidy(policy: CleaningPolicy) -> std::sync::Arc<TidyTable> {
    TableCache::new()
        .load_tidy(FIXTURE, policy, &LoadOptions::default())
        .unwrap()
}

#[test]
fn melt_emits_one_record_per_row_and_year_before_cleaning() {
    let raw = TableCache::new().load(FIXTURE, &LoadOptions::default()).unwrap();
    let kept = melt(&raw, CleaningPolicy::KeepMissing);
    assert_eq!(kept.row_count(), raw.row_count() * raw.year_count());

    let dropped = melt(&raw, CleaningPolicy::DropMissing);
    assert_eq!(dropped.row_count(), kept.row_count() - 2);
    assert!(
        dropped
            .records
            .iter()
            .all(|r| r.unemployment_rate.is_some_and(|v| (0.0..=100.0).contains(&v)))
    );
}

#[test]
fn trend_view_reports_gaps() {
    let t = tidy(CleaningPolicy::KeepMissing);
    let out = trend(&t, "Germany", "Female", "15-24");
    let points: Vec<(i32, Option<f64>)> = out
        .records()
        .unwrap()
        .iter()
        .map(|r| (r.year, r.unemployment_rate))
        .collect();
    assert_eq!(
        points,
        vec![(2014, Some(7.2)), (2015, Some(6.7)), (2016, None), (2017, Some(6.0))]
    );
}

#[test]
fn ranking_and_comparison_views() {
    let t = tidy(CleaningPolicy::DropMissing);

    let top = country_ranking(&t, 2014, "Female", "15-24", 5);
    let names: Vec<&str> = top
        .records()
        .unwrap()
        .iter()
        .map(|r| r.key.country_name.as_str())
        .collect();
    assert_eq!(names, vec!["Spain", "Germany"]);

    let cmp = country_comparison(&t, 2015, "Male", "15-24", ["Chad", "Spain", "Atlantis"]);
    assert_eq!(cmp.len(), 2);

    let nothing = country_comparison(&t, 2015, "Male", "15-24", ["Atlantis"]);
    assert!(nothing.is_empty());
}

#[test]
fn map_and_scatter_views() {
    let t = tidy(CleaningPolicy::DropMissing);

    let map = average_map(&t, 2017);
    let groups = map.groups().unwrap();
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    assert_eq!(keys, vec!["Chad", "Germany", "Spain"]);
    assert!((groups[1].value.unwrap() - 4.8).abs() < 1e-9);
    assert!((groups[2].value.unwrap() - 31.9).abs() < 1e-9);

    let scatter = youth_vs_adult(&t, 2015);
    let pairs = scatter.pairs().unwrap();
    let got: Vec<&str> = pairs.iter().map(|p| p.country_name.as_str()).collect();
    // Chad has no adult series and is dropped.
    assert_eq!(got, vec!["Germany", "Spain"]);
    assert!((pairs[1].a - 48.4).abs() < 1e-9);
    assert!((pairs[1].b - 21.9).abs() < 1e-9);
}

#[test]
fn distribution_and_defaults() {
    let t = tidy(CleaningPolicy::DropMissing);
    assert_eq!(default_map_year(&t), Some(2016));
    assert_eq!(distribution(&t, 2016, 30).total(), 5);
    assert_eq!(t.distinct(Dimension::Country), vec!["Spain", "Germany", "Chad"]);
}

#[test]
fn query_with_year_range_and_mean_by_country() {
    let t = tidy(CleaningPolicy::DropMissing);
    let spec = FilterSpec::new().country("Germany").age_group("25+").year_range(2015, 2016);
    let out = query(&t, &spec, Some(&Aggregation::mean_by_country()));
    let g = out.groups().unwrap();
    assert_eq!(g.len(), 1);
    assert_eq!(g[0].observations, 2);
    assert!((g[0].value.unwrap() - 4.1).abs() < 1e-9);
}

#[test]
fn correlation_heatmap_is_symmetric_with_unit_diagonal() {
    let raw = TableCache::new().load(FIXTURE, &LoadOptions::default()).unwrap();
    let m = correlate(&raw);
    assert_eq!(m.years, vec![2014, 2015, 2016, 2017]);
    for i in 0..m.len() {
        assert_eq!(m.values[i][i], 1.0);
        for j in 0..m.len() {
            assert_eq!(m.values[i][j].to_bits(), m.values[j][i].to_bits());
            assert!(m.values[i][j] > 0.9);
        }
    }
}
