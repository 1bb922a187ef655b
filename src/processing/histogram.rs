//! Equal-width binning of rates for the distribution view.

use serde::Serialize;

/// Bin count the distribution view uses by default.
pub const DEFAULT_BINS: usize = 30;

/// Counts of values per equal-width bin.
///
/// `edges` has `counts.len() + 1` entries; bin `i` covers `[edges[i], edges[i + 1])`, and the
/// last bin also includes its right edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// Total number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Returns `true` if no value was binned.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Bin the present values of `rates` into `bins` equal-width bins spanning their min and max.
///
/// A constant sample is binned over `[v - 0.5, v + 0.5]`. Absent or non-finite values are
/// skipped. With no values (or `bins == 0`) the histogram has no bins.
pub fn histogram(rates: impl IntoIterator<Item = Option<f64>>, bins: usize) -> Histogram {
    let values: Vec<f64> = rates.into_iter().flatten().filter(|v| v.is_finite()).collect();
    if values.is_empty() || bins == 0 {
        return Histogram {
            edges: Vec::new(),
            counts: Vec::new(),
        };
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let (lo, hi) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
    let width = (hi - lo) / bins as f64;

    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }

    Histogram { edges, counts }
}

#[cfg(test)]
mod tests {
    use super::histogram;

    #[test]
    fn bins_span_min_to_max_and_include_right_edge() {
        let h = histogram([Some(0.0), Some(1.0), Some(2.5), None, Some(10.0)], 4);
        assert_eq!(h.edges, vec![0.0, 2.5, 5.0, 7.5, 10.0]);
        assert_eq!(h.counts, vec![2, 1, 0, 1]);
        assert_eq!(h.total(), 4);
    }

    #[test]
    fn constant_sample_is_centered_in_a_unit_range() {
        let h = histogram([Some(5.0), Some(5.0)], 2);
        assert_eq!(h.edges, vec![4.5, 5.0, 5.5]);
        assert_eq!(h.counts, vec![0, 2]);
    }

    #[test]
    fn no_values_means_no_bins() {
        let h = histogram([None, None], 30);
        assert!(h.is_empty());
        assert!(h.edges.is_empty());
        assert!(histogram([Some(1.0)], 0).counts.is_empty());
    }
}
