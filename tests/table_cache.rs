use std::fs::{self, File};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use unemployment_explorer::ingestion::{LoadOptions, TableCache, load};
use unemployment_explorer::processing::CleaningPolicy;

fn tmp_file(tag: &str, ext: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("unemployment-explorer-{tag}-{nanos}.{ext}"))
}

const HEADER: &str = "country_name,indicator_name,sex,age_group,age_categories,2020,2021\n";

fn write_table(path: &PathBuf, rows: &[&str]) {
    let mut text = HEADER.to_string();
    for r in rows {
        text.push_str(r);
        text.push('\n');
    }
    fs::write(path, text).unwrap();
}

#[test]
fn repeated_loads_return_the_cached_table() {
    let cache = TableCache::new();
    let opts = LoadOptions::default();

    let first = cache.load("tests/fixtures/unemployment.csv", &opts).unwrap();
    let second = cache.load("tests/fixtures/unemployment.csv", &opts).unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(*first, *second);
    assert_eq!(cache.len(), 1);
}

#[test]
fn global_load_is_idempotent() {
    let a = load("tests/fixtures/unemployment.csv").unwrap();
    let b = load("tests/fixtures/unemployment.csv").unwrap();
    assert_eq!(*a, *b);
    assert!(TableCache::global().contains("tests/fixtures/unemployment.csv"));
}

#[test]
fn missing_path_is_not_found_and_leaves_other_entries_untouched() {
    let cache = TableCache::new();
    let opts = LoadOptions::default();
    let cached = cache.load("tests/fixtures/unemployment.csv", &opts).unwrap();

    let err = cache
        .load("tests/fixtures/does_not_exist.csv", &opts)
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(cache.len(), 1);
    assert!(!cache.contains("tests/fixtures/does_not_exist.csv"));
    let again = cache.load("tests/fixtures/unemployment.csv", &opts).unwrap();
    assert!(Arc::ptr_eq(&cached, &again));
}

#[test]
fn changed_file_is_reloaded() {
    let path = tmp_file("reload", "csv");
    let cache = TableCache::new();
    let opts = LoadOptions::default();

    write_table(&path, &["Fiji,Unemployment rate,Total,15-24,Youth,3.0,4.0"]);
    let before = cache.load(&path, &opts).unwrap();
    assert_eq!(before.row_count(), 1);

    write_table(
        &path,
        &[
            "Fiji,Unemployment rate,Total,15-24,Youth,3.0,4.0",
            "Togo,Unemployment rate,Total,15-24,Youth,5.0,6.0",
        ],
    );
    // Make sure the modification time differs even on coarse-grained filesystems.
    let bumped = SystemTime::now() + Duration::from_secs(5);
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(bumped)
        .unwrap();

    let after = cache.load(&path, &opts).unwrap();
    assert_eq!(after.row_count(), 2);
    assert!(!Arc::ptr_eq(&before, &after));

    let _ = fs::remove_file(&path);
}

#[test]
fn tidy_tables_are_cached_per_policy() {
    let cache = TableCache::new();
    let opts = LoadOptions::default();
    let path = "tests/fixtures/unemployment.csv";

    let kept = cache.load_tidy(path, CleaningPolicy::KeepMissing, &opts).unwrap();
    let kept_again = cache.load_tidy(path, CleaningPolicy::KeepMissing, &opts).unwrap();
    let dropped = cache.load_tidy(path, CleaningPolicy::DropMissing, &opts).unwrap();

    assert!(Arc::ptr_eq(&kept, &kept_again));
    assert_eq!(kept.row_count(), 6 * 4);
    assert_eq!(dropped.row_count(), 6 * 4 - 2);
    assert_eq!(cache.len(), 1);
}

#[test]
fn read_settings_are_part_of_the_cache_key() {
    let path = tmp_file("delim", "csv");
    fs::write(
        &path,
        "country_name;indicator_name;sex;age_group;age_categories;2020;2021\n\
         Fiji;Unemployment rate;Total;15-24;Youth;3.0;4.0\n",
    )
    .unwrap();
    let cache = TableCache::new();
    let semicolon = LoadOptions {
        delimiter: Some(b';'),
        ..Default::default()
    };

    let first = cache.load(&path, &semicolon).unwrap();
    assert_eq!(first.row_count(), 1);
    let again = cache.load(&path, &semicolon).unwrap();
    assert!(Arc::ptr_eq(&first, &again));

    // Comma-delimited, the header is a single unknown column.
    let err = cache.load(&path, &LoadOptions::default()).unwrap_err();
    assert!(err.to_string().contains("missing required column"));
    assert_eq!(cache.len(), 1);
    assert!(cache.contains(&path));

    let _ = fs::remove_file(&path);
}
