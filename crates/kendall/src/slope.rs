//! Sen's slope and its Gilbert confidence limits.

use mk_tools::median;

use crate::error::{KendallError, check_alpha, check_lengths};
use crate::significance::z_quantile;

/// Sen's slope with lower and upper confidence limits, in value units per
/// second.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SenSlope {
    /// Median pairwise slope.
    pub slope: f64,
    /// Lower confidence limit.
    pub lcl: f64,
    /// Upper confidence limit.
    pub ucl: f64,
}

impl SenSlope {
    /// All three fields NaN.
    pub const NAN: SenSlope = SenSlope {
        slope: f64::NAN,
        lcl: f64::NAN,
        ucl: f64::NAN,
    };

    /// Multiplies all three fields by `factor`.
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            slope: self.slope * factor,
            lcl: self.lcl * factor,
            ucl: self.ucl * factor,
        }
    }
}

/// All slopes `(x_j - x_i) / (t_j - t_i)` over pairs of present values with
/// distinct offsets.
///
/// # Errors
///
/// Returns [`KendallError::LengthMismatch`] if `values` and `offsets` differ
/// in length.
pub fn pairwise_slopes(values: &[Option<f64>], offsets: &[f64]) -> Result<Vec<f64>, KendallError> {
    check_lengths(values.len(), offsets.len())?;
    let valid: Vec<(f64, f64)> = values
        .iter()
        .zip(offsets)
        .filter_map(|(v, &t)| v.map(|x| (t, x)))
        .collect();

    let mut slopes = Vec::with_capacity(valid.len() * valid.len().saturating_sub(1) / 2);
    for (i, &(ti, xi)) in valid.iter().enumerate() {
        for &(tj, xj) in &valid[i + 1..] {
            if tj != ti {
                slopes.push((xj - xi) / (tj - ti));
            }
        }
    }
    Ok(slopes)
}

/// Median slope and confidence limits at level `alpha_cl`.
///
/// With `C = z(1 - alpha_cl/2) sqrt(var_s)` and `N'` slopes, the limits are
/// the `M1 = (N' - C)/2`-th and `(M2 + 1) = (N' + C)/2 + 1`-th smallest
/// slopes (1-based). Fractional ranks are linearly interpolated and ranks
/// outside the sample clamp to the extremes. An empty slope set gives
/// [`SenSlope::NAN`].
///
/// # Errors
///
/// Returns [`KendallError::InvalidAlpha`] if `alpha_cl` is outside (0, 1).
pub fn slope_confidence(
    slopes: &[f64],
    var_s: f64,
    alpha_cl: f64,
) -> Result<SenSlope, KendallError> {
    check_alpha("alpha_cl", alpha_cl)?;
    if slopes.is_empty() {
        return Ok(SenSlope::NAN);
    }
    let mut sorted = slopes.to_vec();
    sorted.sort_by(f64::total_cmp);

    let n = sorted.len() as f64;
    let c = z_quantile(1.0 - alpha_cl / 2.0) * var_s.max(0.0).sqrt();
    let m1 = 0.5 * (n - c);
    let m2 = 0.5 * (n + c);

    Ok(SenSlope {
        slope: median(&sorted),
        lcl: interpolate(&sorted, m1 - 1.0),
        ucl: interpolate(&sorted, m2),
    })
}

/// Linear interpolation of `sorted` at the 0-based fractional position
/// `pos`, clamped to the ends.
fn interpolate(sorted: &[f64], pos: f64) -> f64 {
    let last = sorted.len() - 1;
    if pos <= 0.0 {
        return sorted[0];
    }
    if pos >= last as f64 {
        return sorted[last];
    }
    let lo = pos.floor() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + frac * (sorted[lo + 1] - sorted[lo])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn some(data: &[f64]) -> Vec<Option<f64>> {
        data.iter().map(|&x| Some(x)).collect()
    }

    #[test]
    fn slopes_of_line() {
        let t = [0.0, 10.0, 20.0, 30.0];
        let slopes = pairwise_slopes(&some(&[1.0, 2.0, 3.0, 4.0]), &t).unwrap();
        assert_eq!(slopes.len(), 6);
        for s in slopes {
            assert_relative_eq!(s, 0.1, epsilon = 1e-12);
        }
    }

    #[test]
    fn slopes_skip_missing_and_time_ties() {
        let values = vec![Some(1.0), Some(2.0), None, Some(4.0)];
        let t = [0.0, 0.0, 1.0, 2.0];
        let slopes = pairwise_slopes(&values, &t).unwrap();
        // (1,4) and (2,4)
        assert_eq!(slopes, vec![1.5, 1.0]);
    }

    #[test]
    fn constant_slopes_give_equal_limits() {
        let out = slope_confidence(&[0.5; 45], 125.0, 0.1).unwrap();
        assert_eq!(out.slope, 0.5);
        assert_eq!(out.lcl, 0.5);
        assert_eq!(out.ucl, 0.5);
    }

    #[test]
    fn zero_variance_brackets_median() {
        let slopes = [1.0, 2.0, 3.0, 4.0];
        let out = slope_confidence(&slopes, 0.0, 0.1).unwrap();
        assert_relative_eq!(out.slope, 2.5);
        assert_relative_eq!(out.lcl, 2.0);
        assert_relative_eq!(out.ucl, 3.0);
    }

    #[test]
    fn gilbert_ranks() {
        // N' = 10 slopes 1..=10, C = 1.644853627 * 2
        let slopes: Vec<f64> = (1..=10).map(f64::from).collect();
        let out = slope_confidence(&slopes, 4.0, 0.1).unwrap();
        let c = 2.0 * 1.644853627;
        let m1 = (10.0 - c) / 2.0;
        let m2 = (10.0 + c) / 2.0;
        assert_relative_eq!(out.lcl, m1, epsilon = 1e-8);
        assert_relative_eq!(out.ucl, m2 + 1.0, epsilon = 1e-8);
        assert_relative_eq!(out.slope - out.lcl, out.ucl - out.slope, epsilon = 1e-8);
    }

    #[test]
    fn wide_interval_clamps() {
        let out = slope_confidence(&[1.0, 2.0, 3.0], 1.0e6, 0.05).unwrap();
        assert_eq!(out.lcl, 1.0);
        assert_eq!(out.ucl, 3.0);
    }

    #[test]
    fn empty_is_nan() {
        let out = slope_confidence(&[], 10.0, 0.1).unwrap();
        assert!(out.slope.is_nan() && out.lcl.is_nan() && out.ucl.is_nan());
    }

    #[test]
    fn invalid_alpha() {
        assert!(matches!(
            slope_confidence(&[1.0], 1.0, 0.0),
            Err(KendallError::InvalidAlpha { name: "alpha_cl", .. })
        ));
    }

    #[test]
    fn scaled_to_years() {
        let out = SenSlope {
            slope: 1.0,
            lcl: 0.5,
            ucl: 2.0,
        }
        .scaled(10.0);
        assert_eq!(out.ucl, 20.0);
    }
}
