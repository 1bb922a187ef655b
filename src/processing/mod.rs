//! In-memory transformations over loaded tables.
//!
//! - [`melt()`]: wide [`crate::types::RawTable`] → long [`crate::types::TidyTable`]
//! - [`filter()`]: keep records matching a [`FilterSpec`]
//! - [`group()`], [`top_n()`], [`pair_merge()`]: the aggregations behind the dashboard views
//! - [`correlate()`]: year-to-year correlation over the wide table
//! - [`histogram()`]: rate distribution binning
//!
//! [`crate::query::query`] strings these together for a single view.
//!
//! ## Example: reshape → filter → aggregate
//!
//! ```rust
//! use unemployment_explorer::processing::{filter, group, melt, CleaningPolicy, FilterSpec, GroupOp};
//! use unemployment_explorer::types::{Dimension, RawRecord, RawTable, SeriesKey, YearColumn};
//!
//! let raw = RawTable::new(
//!     ["2022", "2023"].iter().filter_map(|h| YearColumn::parse(h)).collect(),
//!     vec![RawRecord {
//!         key: SeriesKey::new("Chile", "Unemployment rate", "Female", "15-24", "Youth"),
//!         rates: vec![Some(20.0), None],
//!     }],
//! );
//!
//! let tidy = melt(&raw, CleaningPolicy::KeepMissing);
//! assert_eq!(tidy.row_count(), 2);
//!
//! let chile = filter(&tidy, &FilterSpec::new().country("Chile"));
//! let means = group(&chile.records, Dimension::Country, GroupOp::Mean);
//! assert_eq!(means[0].value, Some(20.0));
//! ```

pub mod correlate;
pub mod filter;
pub mod histogram;
pub mod reduce;
pub mod reshape;

pub use correlate::{CorrelationMatrix, correlate};
pub use filter::{FilterSpec, YearFilter, filter, matching};
pub use histogram::{DEFAULT_BINS, Histogram, histogram};
pub use reduce::{Aggregation, GroupOp, GroupRow, PairMerge, PairRow, SortOrder, TopN, group, pair_merge, top_n};
pub use reshape::{CleaningPolicy, melt};
