//! Pairwise correlation between year columns of the wide table.

use serde::Serialize;

use crate::types::RawTable;

/// Symmetric matrix of Pearson coefficients between year columns.
///
/// `values[i][j]` is the coefficient between `years[i]` and `years[j]`. Undefined
/// coefficients (zero variance, fewer than two paired observations) are `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    /// Years in the order of the source's year columns.
    pub years: Vec<i32>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// Coefficient between the columns for `year_a` and `year_b`, if both exist.
    pub fn get(&self, year_a: i32, year_b: i32) -> Option<f64> {
        let i = self.years.iter().position(|y| *y == year_a)?;
        let j = self.years.iter().position(|y| *y == year_b)?;
        Some(self.values[i][j])
    }

    /// Number of year columns.
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Returns `true` if there are no year columns.
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }
}

/// Pearson correlation between every pair of year columns of `raw`.
///
/// Each pair uses only the rows where both values are present. The diagonal is 1.0 for any
/// column with non-zero variance and `NaN` otherwise; a constant column never panics.
pub fn correlate(raw: &RawTable) -> CorrelationMatrix {
    let n = raw.year_count();
    let columns: Vec<Vec<Option<f64>>> = (0..n).map(|i| raw.column(i).collect()).collect();

    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        for j in i..n {
            let r = pearson(&columns[i], &columns[j]);
            let r = if i == j && !r.is_nan() { 1.0 } else { r };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        years: raw.years.iter().map(|y| y.year).collect(),
        values,
    }
}

/// Pearson coefficient over the positions where both `x` and `y` are present.
fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
        .collect();
    if pairs.len() < 2 {
        return f64::NAN;
    }

    let len = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / len;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / len;

    let (mut sxy, mut sxx, mut syy) = (0.0, 0.0, 0.0);
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    if sxx == 0.0 || syy == 0.0 {
        return f64::NAN;
    }
    (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0)
}
