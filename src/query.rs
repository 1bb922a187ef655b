//! Single-call query entrypoint used by every dashboard view.
//!
//! [`query`] filters a [`TidyTable`] with a [`FilterSpec`] and optionally applies one
//! [`Aggregation`]. It never fails: when nothing matches, the returned [`ResultTable`] is empty
//! and the caller shows a "no data available" notice.

use serde::Serialize;

use crate::processing::{
    Aggregation, FilterSpec, GroupOp, GroupRow, PairRow, group, matching, pair_merge, top_n,
};
use crate::types::{Dimension, TidyRecord, TidyTable};

/// Result of a [`query`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResultTable {
    /// Matching records, either in table order or ranked by [`Aggregation::TopN`].
    Records { rows: Vec<TidyRecord> },
    /// One row per group.
    Groups {
        by: Dimension,
        op: GroupOp,
        rows: Vec<GroupRow>,
    },
    /// Countries present in both age groups of a pair merge.
    Pairs {
        group_a: String,
        group_b: String,
        rows: Vec<PairRow>,
    },
}

impl ResultTable {
    /// Number of rows.
    pub fn len(&self) -> usize {
        match self {
            Self::Records { rows } => rows.len(),
            Self::Groups { rows, .. } => rows.len(),
            Self::Pairs { rows, .. } => rows.len(),
        }
    }

    /// Returns `true` if no row matched; callers render "no data available".
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The rows of a [`ResultTable::Records`] result.
    pub fn records(&self) -> Option<&[TidyRecord]> {
        match self {
            Self::Records { rows } => Some(rows),
            _ => None,
        }
    }

    /// The rows of a [`ResultTable::Groups`] result.
    pub fn groups(&self) -> Option<&[GroupRow]> {
        match self {
            Self::Groups { rows, .. } => Some(rows),
            _ => None,
        }
    }

    /// The rows of a [`ResultTable::Pairs`] result.
    pub fn pairs(&self) -> Option<&[PairRow]> {
        match self {
            Self::Pairs { rows, .. } => Some(rows),
            _ => None,
        }
    }
}

/// Filter `table` with `spec`, then apply `aggregation` if given.
///
/// ```rust
/// use unemployment_explorer::processing::{Aggregation, CleaningPolicy, FilterSpec, melt};
/// use unemployment_explorer::query::query;
/// use unemployment_explorer::types::{RawRecord, RawTable, SeriesKey, YearColumn};
///
/// let raw = RawTable::new(
///     YearColumn::parse("2023").into_iter().collect(),
///     vec![
///         RawRecord {
///             key: SeriesKey::new("Spain", "Unemployment rate", "Total", "15-24", "Youth"),
///             rates: vec![Some(28.0)],
///         },
///         RawRecord {
///             key: SeriesKey::new("Spain", "Unemployment rate", "Total", "25+", "Adults"),
///             rates: vec![Some(11.0)],
///         },
///     ],
/// );
/// let tidy = melt(&raw, CleaningPolicy::DropMissing);
///
/// let spec = FilterSpec::new().year(2023);
/// let pairs = query(&tidy, &spec, Some(&Aggregation::pair_merge("15-24", "25+")));
/// assert_eq!(pairs.len(), 1);
///
/// let none = query(&tidy, &FilterSpec::new().country("Atlantis"), None);
/// assert!(none.is_empty());
/// ```
pub fn query(table: &TidyTable, spec: &FilterSpec, aggregation: Option<&Aggregation>) -> ResultTable {
    let rows = matching(table, spec);

    let result = match aggregation {
        None => ResultTable::Records {
            rows: rows.cloned().collect(),
        },
        Some(Aggregation::TopN(top)) => ResultTable::Records {
            rows: top_n(rows.cloned().collect(), *top, |r| r.unemployment_rate),
        },
        Some(Aggregation::Group { by, op, top }) => {
            let groups = group(rows, *by, *op);
            let groups = match top {
                Some(top) => top_n(groups, *top, |g| g.value),
                None => groups,
            };
            ResultTable::Groups {
                by: *by,
                op: *op,
                rows: groups,
            }
        }
        Some(Aggregation::PairMerge(merge)) => ResultTable::Pairs {
            group_a: merge.group_a.clone(),
            group_b: merge.group_b.clone(),
            rows: pair_merge(rows, merge),
        },
    };

    log::debug!(
        "query spec={spec:?} aggregation={aggregation:?} -> {} row(s)",
        result.len()
    );
    result
}
