//! Sample autocorrelation of series with missing values.

/// Spread, relative to the largest magnitude, below which values are
/// treated as constant up to rounding.
const RELATIVE_SPREAD: f64 = 1e-10;

/// Lag-`lag` sample autocorrelation of `values`, skipping missing entries.
///
/// Mean and variance are taken over all present values; the lagged sum runs
/// over the pairs `(t, t + lag)` where both ends are present, normalised by
/// the total sum of squares (the biased estimator, so lag 0 is exactly 1).
///
/// Returns `None` when fewer than 2 values are present, the present values
/// are constant (up to rounding), or fewer than 2 complete pairs exist at a
/// non-zero lag.
pub fn nan_autocorr(values: &[Option<f64>], lag: usize) -> Option<f64> {
    let valid: Vec<f64> = values.iter().flatten().copied().collect();
    if valid.len() < 2 {
        return None;
    }
    let m = valid.iter().sum::<f64>() / valid.len() as f64;
    let denom: f64 = valid.iter().map(|&x| (x - m) * (x - m)).sum();
    let max_abs = valid.iter().fold(0.0f64, |acc, x| acc.max(x.abs()));
    let rms = (denom / valid.len() as f64).sqrt();
    if denom <= 0.0 || rms <= RELATIVE_SPREAD * max_abs {
        return None;
    }
    if lag == 0 {
        return Some(1.0);
    }
    if lag >= values.len() {
        return None;
    }

    let mut n_pairs = 0usize;
    let mut num = 0.0;
    for (a, b) in values.iter().zip(values[lag..].iter()) {
        if let (Some(a), Some(b)) = (a, b) {
            num += (a - m) * (b - m);
            n_pairs += 1;
        }
    }
    if n_pairs < 2 {
        return None;
    }
    Some(num / denom)
}

/// Autocorrelation function for lags `0..=nlags`.
pub fn nan_acf(values: &[Option<f64>], nlags: usize) -> Vec<Option<f64>> {
    (0..=nlags).map(|lag| nan_autocorr(values, lag)).collect()
}
