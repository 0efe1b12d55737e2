use std::collections::BTreeMap;

use thiserror::Error;

use super::model::{DataError, TrackTable};

// ---------------------------------------------------------------------------
// Descriptive summary
// ---------------------------------------------------------------------------

/// Per-column descriptive statistics, computed over the non-NaN values.
///
/// Conventions (pinned for every page): standard deviation is the sample
/// deviation (n − 1 denominator) and quantiles are linearly interpolated.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// Summarize one numeric series. `None` when no finite value exists.
pub fn describe(values: &[f64]) -> Option<Summary> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return None;
    }

    let count = finite.len();
    let mean = finite.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let ss: f64 = finite.iter().map(|v| (v - mean).powi(2)).sum();
        (ss / (count as f64 - 1.0)).sqrt()
    } else {
        f64::NAN
    };

    finite.sort_by(f64::total_cmp);
    Some(Summary {
        count,
        mean,
        std,
        min: finite[0],
        q25: percentile_sorted(&finite, 0.25),
        median: percentile_sorted(&finite, 0.5),
        q75: percentile_sorted(&finite, 0.75),
        max: finite[count - 1],
    })
}

/// Linearly interpolated percentile over an ascending-sorted, non-empty
/// slice, `q` in [0, 1].
fn percentile_sorted(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
    }
}

/// Percentile of an arbitrary series, NaN-skipping. `None` when empty.
pub fn percentile_of(values: &[f64], q: f64) -> Option<f64> {
    let mut finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return None;
    }
    finite.sort_by(f64::total_cmp);
    Some(percentile_sorted(&finite, q))
}

// ---------------------------------------------------------------------------
// Correlation
// ---------------------------------------------------------------------------

/// Pearson correlation over pairwise-complete observations. `None` with
/// fewer than two complete pairs or when either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        None
    } else {
        Some(cov / denom)
    }
}

/// Symmetric correlation matrix over the given numeric columns, unit
/// diagonal, NaN where the coefficient is undefined.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

pub fn correlation_matrix(
    table: &TrackTable,
    columns: &[String],
) -> Result<CorrelationMatrix, DataError> {
    let series: Vec<Vec<f64>> = columns
        .iter()
        .map(|c| table.numeric(c))
        .collect::<Result<_, _>>()?;

    let n = series.len();
    let mut values = vec![vec![f64::NAN; n]; n];
    for i in 0..n {
        values[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&series[i], &series[j]).unwrap_or(f64::NAN);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    })
}

// ---------------------------------------------------------------------------
// Group mean
// ---------------------------------------------------------------------------

/// Mean of `metric` per distinct value of the categorical column, sorted
/// by category. One entry per observed value, no binning; categories whose
/// metric values are all missing yield NaN.
pub fn group_mean(
    table: &TrackTable,
    category: &str,
    metric: &str,
) -> Result<Vec<(String, f64)>, DataError> {
    let categories = table.text(category)?;
    let values = table.numeric(metric)?;

    let mut acc: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for (cat, &v) in categories.iter().zip(&values) {
        let entry = acc.entry(cat.as_str()).or_insert((0.0, 0));
        if !v.is_nan() {
            entry.0 += v;
            entry.1 += 1;
        }
    }

    Ok(acc
        .into_iter()
        .map(|(cat, (sum, n))| {
            let mean = if n > 0 { sum / n as f64 } else { f64::NAN };
            (cat.to_string(), mean)
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Trendline
// ---------------------------------------------------------------------------

/// Ordinary least-squares fit `y = slope · x + intercept` over pairwise-
/// complete observations. `None` below two pairs or at zero x-variance.
pub fn linear_fit(x: &[f64], y: &[f64]) -> Option<(f64, f64)> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| !a.is_nan() && !b.is_nan())
        .map(|(&a, &b)| (a, b))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    for (a, b) in &pairs {
        cov += (a - mean_x) * (b - mean_y);
        var_x += (a - mean_x).powi(2);
    }
    if var_x == 0.0 {
        return None;
    }

    let slope = cov / var_x;
    Some((slope, mean_y - slope * mean_x))
}

// ---------------------------------------------------------------------------
// Histograms
// ---------------------------------------------------------------------------

/// Equal-width histogram over a fixed range.
#[derive(Debug, Clone)]
pub struct Histogram {
    pub min: f64,
    pub bin_width: f64,
    pub counts: Vec<u64>,
}

impl Histogram {
    /// Center of bin `i`, in data units.
    pub fn center(&self, i: usize) -> f64 {
        self.min + (i as f64 + 0.5) * self.bin_width
    }
}

/// Bin the non-NaN values into `bins` equal-width buckets spanning the
/// observed range. `None` when there is nothing to bin.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() || bins == 0 {
        return None;
    }
    let min = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let max = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    Some(histogram_in(&finite, min, max, bins))
}

/// Bin values into `bins` buckets over an explicit [min, max] range, so
/// several series can share one axis. Values outside the range are clamped
/// into the edge bins; NaN is skipped.
pub fn histogram_in(values: &[f64], min: f64, max: f64, bins: usize) -> Histogram {
    let width = if max > min {
        (max - min) / bins as f64
    } else {
        1.0
    };

    let mut counts = vec![0u64; bins.max(1)];
    for &v in values {
        if v.is_nan() {
            continue;
        }
        let idx = ((v - min) / width).floor() as i64;
        let idx = idx.clamp(0, counts.len() as i64 - 1) as usize;
        counts[idx] += 1;
    }

    Histogram {
        min,
        bin_width: width,
        counts,
    }
}

// ---------------------------------------------------------------------------
// Relationship view
// ---------------------------------------------------------------------------

/// Failure modes of the relationship view. `IdenticalAxes` is the user-
/// correctable precondition; it is checked before any series is read.
#[derive(Debug, Error, PartialEq)]
pub enum RelationError {
    #[error("X-axis and Y-axis variables cannot be the same")]
    IdenticalAxes,
    #[error(transparent)]
    Data(#[from] DataError),
}

/// Paired series plus the derived statistics the correlation page shows.
#[derive(Debug, Clone)]
pub struct Relationship {
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
    pub pearson: Option<f64>,
    pub trend: Option<(f64, f64)>,
}

/// Validate and compute the relationship between two numeric columns.
pub fn relationship(
    table: &TrackTable,
    x_col: &str,
    y_col: &str,
) -> Result<Relationship, RelationError> {
    if x_col == y_col {
        return Err(RelationError::IdenticalAxes);
    }
    let xs = table.numeric(x_col)?;
    let ys = table.numeric(y_col)?;
    Ok(Relationship {
        pearson: pearson(&xs, &ys),
        trend: linear_fit(&xs, &ys),
        xs,
        ys,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Column;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn describe_uses_sample_std_and_interpolated_quartiles() {
        let s = describe(&[1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_eq!(s.count, 4);
        assert!(close(s.mean, 2.5));
        // Sample std of 1..4 is sqrt(5/3).
        assert!(close(s.std, (5.0f64 / 3.0).sqrt()));
        assert!(close(s.q25, 1.75));
        assert!(close(s.median, 2.5));
        assert!(close(s.q75, 3.25));
        assert_eq!(s.min, 1.0);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn describe_skips_nan_and_reports_reduced_count() {
        let s = describe(&[1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(s.count, 2);
        assert!(close(s.mean, 2.0));
        assert!(describe(&[f64::NAN, f64::NAN]).is_none());
    }

    #[test]
    fn pearson_on_exact_lines() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let up: Vec<f64> = x.iter().map(|v| 2.0 * v + 1.0).collect();
        let down: Vec<f64> = x.iter().map(|v| -v + 10.0).collect();
        assert!(close(pearson(&x, &up).unwrap(), 1.0));
        assert!(close(pearson(&x, &down).unwrap(), -1.0));
    }

    #[test]
    fn pearson_is_pairwise_complete_and_guards_degenerate_input() {
        let x = [1.0, f64::NAN, 3.0, 4.0];
        let y = [2.0, 100.0, 6.0, 8.0];
        assert!(close(pearson(&x, &y).unwrap(), 1.0));

        assert!(pearson(&[1.0], &[2.0]).is_none());
        assert!(pearson(&[1.0, 1.0], &[2.0, 3.0]).is_none());
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let t = TrackTable::new(
            vec!["a".into(), "b".into()],
            vec![
                Column::Float(vec![1.0, 2.0, 3.0]),
                Column::Float(vec![2.0, 4.0, 6.0]),
            ],
        );
        let m = correlation_matrix(&t, &["a".to_string(), "b".to_string()]).unwrap();
        assert_eq!(m.values[0][0], 1.0);
        assert_eq!(m.values[1][1], 1.0);
        assert!(close(m.values[0][1], 1.0));
        assert_eq!(m.values[0][1], m.values[1][0]);
    }

    #[test]
    fn group_mean_emits_one_row_per_observed_category() {
        let t = TrackTable::new(
            vec!["Album_type".into(), "Energy".into()],
            vec![
                Column::Text(vec![
                    "single".into(),
                    "album".into(),
                    "album".into(),
                    "single".into(),
                ]),
                Column::Float(vec![0.2, 0.4, 0.6, f64::NAN]),
            ],
        );
        let means = group_mean(&t, "Album_type", "Energy").unwrap();
        assert_eq!(means.len(), 2);
        assert_eq!(means[0].0, "album");
        assert!(close(means[0].1, 0.5));
        assert_eq!(means[1].0, "single");
        assert!(close(means[1].1, 0.2));
    }

    #[test]
    fn linear_fit_recovers_slope_and_intercept() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<f64> = x.iter().map(|v| 3.0 * v - 1.0).collect();
        let (slope, intercept) = linear_fit(&x, &y).unwrap();
        assert!(close(slope, 3.0));
        assert!(close(intercept, -1.0));
        assert!(linear_fit(&[1.0, 1.0], &[2.0, 3.0]).is_none());
    }

    #[test]
    fn histogram_bins_span_the_range() {
        let h = histogram(&[0.0, 0.1, 0.5, 0.9, 1.0, f64::NAN], 10).unwrap();
        assert_eq!(h.counts.len(), 10);
        assert_eq!(h.counts.iter().sum::<u64>(), 5);
        // Max value lands in the last bin, not out of range.
        assert_eq!(h.counts[9], 2);
        assert!(close(h.center(0), 0.05));
    }

    #[test]
    fn shared_range_histograms_are_comparable() {
        let a = histogram_in(&[0.0, 0.2], 0.0, 1.0, 5);
        let b = histogram_in(&[0.9, 1.0], 0.0, 1.0, 5);
        assert_eq!(a.counts, vec![1, 1, 0, 0, 0]);
        assert_eq!(b.counts, vec![0, 0, 0, 0, 2]);
        assert_eq!(a.bin_width, b.bin_width);
    }

    #[test]
    fn percentile_of_interpolates() {
        let v = [4.0, 1.0, 3.0, 2.0];
        assert!(close(percentile_of(&v, 0.5).unwrap(), 2.5));
        assert!(close(percentile_of(&v, 0.0).unwrap(), 1.0));
        assert!(percentile_of(&[f64::NAN], 0.5).is_none());
    }

    #[test]
    fn identical_axes_are_rejected_before_any_computation() {
        // No numeric columns at all: if the axes check ran after the reads
        // this would surface as UnknownColumn instead.
        let t = TrackTable::new(vec![], vec![]);
        assert!(matches!(
            relationship(&t, "Energy", "Energy"),
            Err(RelationError::IdenticalAxes)
        ));
    }

    #[test]
    fn relationship_carries_pearson_and_trend() {
        let t = TrackTable::new(
            vec!["x".into(), "y".into()],
            vec![
                Column::Float(vec![1.0, 2.0, 3.0]),
                Column::Float(vec![2.0, 4.0, 6.0]),
            ],
        );
        let rel = relationship(&t, "x", "y").unwrap();
        assert!(close(rel.pearson.unwrap(), 1.0));
        let (slope, intercept) = rel.trend.unwrap();
        assert!(close(slope, 2.0));
        assert!(close(intercept, 0.0));
    }
}
