//! Grouping, ranking and merging of tidy records.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;

use crate::types::{Dimension, TidyRecord};

/// How rates are combined within a group. Absent rates are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupOp {
    /// Arithmetic mean.
    Mean,
    /// Sum.
    Sum,
}

/// Sort direction for [`TopN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Highest rate first.
    #[default]
    Descending,
    /// Lowest rate first.
    Ascending,
}

/// Keep the first `n` rows after sorting by rate.
///
/// The sort is stable (ties keep their input order) and absent rates always sort last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopN {
    pub n: usize,
    pub order: SortOrder,
}

impl TopN {
    /// The `n` highest rates.
    pub fn descending(n: usize) -> Self {
        Self {
            n,
            order: SortOrder::Descending,
        }
    }

    /// The `n` lowest rates.
    pub fn ascending(n: usize) -> Self {
        Self {
            n,
            order: SortOrder::Ascending,
        }
    }
}

/// Compare two age groups per country (youth vs. adult view).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PairMerge {
    /// Age group for the first value of each pair (e.g. `15-24`).
    pub group_a: String,
    /// Age group for the second value of each pair (e.g. `25+`).
    pub group_b: String,
}

/// Aggregation applied after filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Aggregation {
    /// One row per distinct value of `by`, optionally ranked and truncated.
    Group {
        by: Dimension,
        op: GroupOp,
        top: Option<TopN>,
    },
    /// Rank the filtered records themselves.
    TopN(TopN),
    /// Mean per country for two age groups, inner-joined on country.
    PairMerge(PairMerge),
}

impl Aggregation {
    /// Mean rate per country (choropleth view).
    pub fn mean_by_country() -> Self {
        Self::group(Dimension::Country, GroupOp::Mean)
    }

    /// `op` over each distinct value of `by`, ordered by group key.
    pub fn group(by: Dimension, op: GroupOp) -> Self {
        Self::Group { by, op, top: None }
    }

    /// `op` over each distinct value of `by`, then ranked and truncated by `top`.
    pub fn group_top_n(by: Dimension, op: GroupOp, top: TopN) -> Self {
        Self::Group {
            by,
            op,
            top: Some(top),
        }
    }

    /// The `n` records with the highest rate.
    pub fn top_n(n: usize) -> Self {
        Self::TopN(TopN::descending(n))
    }

    /// Youth-vs-adult style comparison of `group_a` and `group_b` per country.
    pub fn pair_merge(group_a: impl Into<String>, group_b: impl Into<String>) -> Self {
        Self::PairMerge(PairMerge {
            group_a: group_a.into(),
            group_b: group_b.into(),
        })
    }
}

/// One aggregated group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupRow {
    /// Group key (e.g. a country name).
    pub key: String,
    /// Aggregated rate, or `None` if the group had no present rate.
    pub value: Option<f64>,
    /// Number of present rates that went into `value`.
    pub observations: usize,
}

/// One country present in both groups of a [`PairMerge`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairRow {
    pub country_name: String,
    /// Mean rate for [`PairMerge::group_a`].
    pub a: f64,
    /// Mean rate for [`PairMerge::group_b`].
    pub b: f64,
}

#[derive(Default)]
struct Accumulator {
    sum: f64,
    count: usize,
}

/// Aggregate `records` per distinct value of `by`. Groups are ordered by key.
///
/// Absent rates are ignored; a group whose rates are all absent gets `value: None`.
pub fn group<'a>(records: impl IntoIterator<Item = &'a TidyRecord>, by: Dimension, op: GroupOp) -> Vec<GroupRow> {
    let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
    for r in records {
        let acc = groups.entry(r.dimension_value(by).into_owned()).or_default();
        if let Some(v) = r.unemployment_rate {
            acc.sum += v;
            acc.count += 1;
        }
    }

    groups
        .into_iter()
        .map(|(key, acc)| {
            let value = match (op, acc.count) {
                (_, 0) => None,
                (GroupOp::Sum, _) => Some(acc.sum),
                (GroupOp::Mean, n) => Some(acc.sum / n as f64),
            };
            GroupRow {
                key,
                value,
                observations: acc.count,
            }
        })
        .collect()
}

/// Stable-sort `rows` by `rate` in `top.order` and keep the first `top.n`.
pub fn top_n<T>(mut rows: Vec<T>, top: TopN, rate: impl Fn(&T) -> Option<f64>) -> Vec<T> {
    rows.sort_by(|x, y| compare_rates(rate(x), rate(y), top.order));
    rows.truncate(top.n);
    rows
}

fn compare_rates(x: Option<f64>, y: Option<f64>, order: SortOrder) -> Ordering {
    match (x, y) {
        (Some(x), Some(y)) => match order {
            SortOrder::Descending => y.total_cmp(&x),
            SortOrder::Ascending => x.total_cmp(&y),
        },
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Mean rate per country for `merge.group_a` and `merge.group_b`, inner-joined on country.
///
/// Countries missing from either side, or without any present rate on a side, are dropped.
/// Rows are ordered by country.
pub fn pair_merge<'a>(records: impl IntoIterator<Item = &'a TidyRecord> + Clone, merge: &PairMerge) -> Vec<PairRow> {
    let side = |age_group: &str| -> BTreeMap<String, f64> {
        let rows = records.clone().into_iter().filter(|r| r.key.age_group == age_group);
        group(rows, Dimension::Country, GroupOp::Mean)
            .into_iter()
            .filter_map(|g| g.value.map(|v| (g.key, v)))
            .collect()
    };
    let a = side(&merge.group_a);
    let mut b = side(&merge.group_b);

    a.into_iter()
        .filter_map(|(country_name, a)| {
            b.remove(&country_name).map(|b| PairRow { country_name, a, b })
        })
        .collect()
}
