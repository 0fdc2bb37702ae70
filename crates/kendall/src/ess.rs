//! Effective-sample-size correction of Var(S) for autocorrelated series.

use mk_tools::{median, nan_autocorr};

use crate::error::{KendallError, check_alpha};
use crate::significance::z_quantile;
use crate::slope::pairwise_slopes;

/// Variance inflation factor `n / n* = 1 + 2 Σ_k (1 - k/n) ρ_k`
/// (Yue & Wang 2004).
///
/// The series is detrended with its Sen slope first; only autocorrelations
/// with `|ρ_k| > z(1 - alpha_ak/2) / sqrt(n_valid)` enter the sum. A
/// non-positive or undefined factor returns 1 (no correction).
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`KendallError::LengthMismatch`] | `values.len() != offsets.len()` |
/// | [`KendallError::InvalidAlpha`] | `alpha_ak` outside (0, 1) |
pub fn ess_factor(
    values: &[Option<f64>],
    offsets: &[f64],
    alpha_ak: f64,
) -> Result<f64, KendallError> {
    check_alpha("alpha_ak", alpha_ak)?;
    let mut slopes = pairwise_slopes(values, offsets)?;
    if slopes.is_empty() {
        return Ok(1.0);
    }
    slopes.sort_by(f64::total_cmp);
    let b = median(&slopes);

    let detrended: Vec<Option<f64>> = values
        .iter()
        .zip(offsets)
        .map(|(v, &t)| v.map(|x| x - b * t))
        .collect();

    let n_valid = detrended.iter().filter(|v| v.is_some()).count();
    let n = detrended.len() as f64;
    let bound = z_quantile(1.0 - alpha_ak / 2.0) / (n_valid as f64).sqrt();

    let sum: f64 = (1..detrended.len())
        .filter_map(|k| nan_autocorr(&detrended, k).map(|rho| (k, rho)))
        .filter(|&(_, rho)| rho.abs() > bound)
        .map(|(k, rho)| (1.0 - k as f64 / n) * rho)
        .sum();

    let factor = 1.0 + 2.0 * sum;
    if factor.is_finite() && factor > 0.0 {
        Ok(factor)
    } else {
        Ok(1.0)
    }
}
