use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use serde_json::json;

use unemployment_explorer::ingestion::{LoadOptions, LogObserver, TableCache};
use unemployment_explorer::processing::{Aggregation, CleaningPolicy, DEFAULT_BINS, FilterSpec, GroupOp, TopN, correlate};
use unemployment_explorer::query::query;
use unemployment_explorer::types::Dimension;
use unemployment_explorer::views::{average_map, default_map_year, distribution, youth_vs_adult};

/// Print the default dashboard views of an unemployment table as JSON.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the wide unemployment data file (.csv, .tsv or .json).
    path: PathBuf,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let opts = LoadOptions {
        observer: Some(Arc::new(LogObserver)),
        ..Default::default()
    };
    let cache = TableCache::global();

    let raw = match cache.load(&args.path, &opts) {
        Ok(raw) => raw,
        Err(e) if e.is_not_found() => {
            bail!("{e}. Please make sure the data file exists and try again.")
        }
        Err(e) => return Err(e).with_context(|| format!("failed to load {}", args.path.display())),
    };
    let tidy = cache.load_tidy(&args.path, CleaningPolicy::DropMissing, &opts)?;

    let Some(year) = default_map_year(&tidy) else {
        bail!("{} has no year columns", args.path.display());
    };

    let highest_means = query(
        &tidy,
        &FilterSpec::new().year(year),
        Some(&Aggregation::group_top_n(Dimension::Country, GroupOp::Mean, TopN::descending(10))),
    );

    let report = json!({
        "path": args.path,
        "rows": raw.row_count(),
        "year_bounds": tidy.year_bounds(),
        "year": year,
        "countries": tidy.distinct(Dimension::Country).len(),
        "sexes": tidy.distinct(Dimension::Sex),
        "age_groups": tidy.distinct(Dimension::AgeGroup),
        "map": average_map(&tidy, year),
        "highest_mean_rates": highest_means,
        "youth_vs_adult": youth_vs_adult(&tidy, year),
        "distribution": distribution(&tidy, year, DEFAULT_BINS),
        "correlation": correlate(&raw),
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
