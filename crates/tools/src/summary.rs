//! Summary statistics over complete and partially missing data.

/// Arithmetic mean of a slice. Returns 0.0 if empty.
pub fn mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    let sum: f64 = data.iter().sum();
    sum / data.len() as f64
}

/// Sample variance with N-1 denominator.
/// Returns 0.0 if fewer than 2 elements.
pub fn variance(data: &[f64]) -> f64 {
    let n = data.len();
    if n < 2 {
        return 0.0;
    }
    let nf = n as f64;
    let mean = data.iter().sum::<f64>() / nf;
    data.iter().map(|&x| (x - mean) * (x - mean)).sum::<f64>() / (nf - 1.0)
}

/// Median of pre-sorted data. For even length, averages the middle two values.
///
/// # Panics
///
/// Panics if `sorted` is empty.
pub fn median(sorted: &[f64]) -> f64 {
    assert!(!sorted.is_empty(), "median: input must not be empty");
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

fn present(data: &[Option<f64>]) -> Vec<f64> {
    data.iter().flatten().copied().collect()
}

/// Mean of the present values. `None` if every value is missing.
pub fn nan_mean(data: &[Option<f64>]) -> Option<f64> {
    let valid = present(data);
    if valid.is_empty() {
        return None;
    }
    Some(mean(&valid))
}

/// Sample variance (N-1) of the present values.
/// `None` if fewer than 2 values are present.
pub fn nan_variance(data: &[Option<f64>]) -> Option<f64> {
    let valid = present(data);
    if valid.len() < 2 {
        return None;
    }
    Some(variance(&valid))
}

/// Median of the present values, in any order. `None` if every value is missing.
pub fn nan_median(data: &[Option<f64>]) -> Option<f64> {
    let mut valid = present(data);
    if valid.is_empty() {
        return None;
    }
    valid.sort_by(f64::total_cmp);
    Some(median(&valid))
}
