//! Descriptive statistics over plain `f64` slices.

/// Five-number summary plus moments for one numeric column
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` with fewer than two values
    pub std_dev: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    /// Values outside `[q1 - 1.5 * iqr, q3 + 1.5 * iqr]`
    pub outliers: usize,
}

impl NumericSummary {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let mean = mean(&sorted);
        let std_dev = if count > 1 {
            let variance = sorted.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            Some(variance.sqrt())
        } else {
            None
        };

        let q1 = quantile(&sorted, 0.25);
        let q3 = quantile(&sorted, 0.75);
        let iqr = q3 - q1;
        let (low, high) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);
        let outliers = sorted.iter().filter(|v| **v < low || **v > high).count();

        Some(Self {
            count,
            mean,
            std_dev,
            min: sorted[0],
            q1,
            median: quantile(&sorted, 0.5),
            q3,
            max: sorted[count - 1],
            outliers,
        })
    }
}

pub fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Quantile of already sorted values with linear interpolation between closest ranks.
/// `sorted` must not be empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let weight = position - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

/// Pearson correlation of paired observations. `None` with fewer than three pairs or zero variance.
pub fn pearson(pairs: &[(f64, f64)]) -> Option<f64> {
    if pairs.len() < 3 {
        return None;
    }
    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(x, _)| x).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, y)| y).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in pairs {
        let (dx, dy) = (x - mean_x, y - mean_y);
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summary_matches_known_values() {
        let summary = NumericSummary::from_values(&[4.0, 1.0, 3.0, 2.0]).unwrap();

        assert_eq!(summary.count, 4);
        assert!(close(summary.mean, 2.5));
        assert!(close(summary.std_dev.unwrap(), (5.0f64 / 3.0).sqrt()));
        assert!(close(summary.min, 1.0));
        assert!(close(summary.q1, 1.75));
        assert!(close(summary.median, 2.5));
        assert!(close(summary.q3, 3.25));
        assert!(close(summary.max, 4.0));
        assert_eq!(summary.outliers, 0);
    }

    #[test]
    fn test_outliers_use_iqr_fences() {
        let summary = NumericSummary::from_values(&[10.0, 11.0, 12.0, 13.0, 14.0, 100.0]).unwrap();
        assert_eq!(summary.outliers, 1);
    }

    #[test]
    fn test_single_value_has_no_std_dev() {
        let summary = NumericSummary::from_values(&[7.0]).unwrap();
        assert_eq!(summary.std_dev, None);
        assert!(close(summary.median, 7.0));
        assert!(NumericSummary::from_values(&[]).is_none());
    }

    #[test]
    fn test_pearson() {
        let perfect = [(1.0, 2.0), (2.0, 4.0), (3.0, 6.0)];
        assert!(close(pearson(&perfect).unwrap(), 1.0));

        let inverse = [(1.0, 3.0), (2.0, 2.0), (3.0, 1.0)];
        assert!(close(pearson(&inverse).unwrap(), -1.0));

        assert_eq!(pearson(&[(1.0, 1.0), (2.0, 1.0), (3.0, 1.0)]), None);
        assert_eq!(pearson(&[(1.0, 1.0), (2.0, 2.0)]), None);
    }
}
