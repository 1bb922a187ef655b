//! `unemployment-explorer` loads the global unemployment table (one row per country, indicator,
//! sex and age group, one column per year), reshapes it into tidy records, and answers the
//! filter/aggregate queries behind each dashboard view.
//!
//! ## Pipeline
//!
//! 1. **Load** a wide file into a [`types::RawTable`] with [`ingestion::load`]. Results are
//!    cached per path for the life of the process; a missing file is
//!    [`ExplorerError::NotFound`].
//! 2. **Reshape** it with [`processing::melt`] into a [`types::TidyTable`], choosing a
//!    [`processing::CleaningPolicy`]: dashboards drop absent rates, the trend view keeps them so
//!    it can say "no data".
//! 3. **Query** it with [`query::query`], a [`processing::FilterSpec`] and an optional
//!    [`processing::Aggregation`]. An empty [`query::ResultTable`] is a normal outcome.
//!
//! [`processing::correlate`] works on the wide table directly and yields the year-to-year
//! correlation matrix.
//!
//! ## Input format
//!
//! Delimited text (or JSON records) with the identifier columns `country_name`,
//! `indicator_name`, `sex`, `age_group`, `age_categories`, plus any number of columns whose
//! header starts with a 4-digit year. The year range comes from the headers. Cells that are
//! empty, non-numeric or outside `[0, 100]` are absent values.
//!
//! ## Example
//!
//! ```no_run
//! use unemployment_explorer::ingestion::load_tidy;
//! use unemployment_explorer::processing::{Aggregation, CleaningPolicy, FilterSpec};
//! use unemployment_explorer::query::query;
//!
//! # fn main() -> Result<(), unemployment_explorer::ExplorerError> {
//! let tidy = load_tidy("global_unemployment_data.csv", CleaningPolicy::DropMissing)?;
//! let spec = FilterSpec::new().year(2023).sex("Female").age_group("15-24");
//! let top = query(&tidy, &spec, Some(&Aggregation::top_n(10)));
//! if top.is_empty() {
//!     println!("No data available for the selected criteria.");
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loaders, options, observers and the path cache
//! - [`types`]: raw and tidy table types
//! - [`processing`]: reshape, filter, aggregate, correlate, histogram
//! - [`query`]: the single-call query entrypoint and its result type
//! - [`views`]: query presets for each dashboard view
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod processing;
pub mod query;
pub mod types;
pub mod views;

pub use error::{ExplorerError, ExplorerResult};
