//! Lag-1 autoregressive estimation and removal on series with gaps.

use mk_kendall::z_quantile;
use mk_tools::{levinson, nan_acf};
use tracing::debug;

/// Largest lag of the autocorrelation function used for the AR fit.
const MAX_LAG: usize = 10;
/// Largest AR order passed to the Levinson-Durbin recursion.
const MAX_ORDER: usize = 5;

/// Lag-1 autocorrelation estimate and the AR(1)-removed series.
#[derive(Debug, Clone, PartialEq)]
pub struct ArEstimate {
    /// Lag-1 autocorrelation, NaN when it cannot be computed.
    pub ak: f64,
    /// Whether `ak` passed the significance test.
    pub significant: bool,
    /// `x[t] - ak x[t-1]` (first value missing) when significant, else the
    /// input unchanged.
    pub values: Vec<Option<f64>>,
}

impl ArEstimate {
    fn unchanged(values: &[Option<f64>], ak: f64) -> Self {
        Self {
            ak,
            significant: false,
            values: values.to_vec(),
        }
    }
}

/// Estimates the lag-1 autocorrelation of `values` and removes it when
/// significant at `alpha_ak`.
///
/// Uses `nlag = min(10, len/2)` lags of the autocorrelation function and an
/// AR order of `min(5, nlag - 1)` (at least 1) in the Levinson-Durbin
/// recursion. The first partial autocorrelation is significant when
/// `|ak| >= z(1 - alpha_ak/2) / sqrt(n_valid)`. An unavailable
/// autocorrelation or a singular Toeplitz system counts as not significant.
pub fn nanprewhite_ar(values: &[Option<f64>], alpha_ak: f64) -> ArEstimate {
    let n_valid = values.iter().filter(|v| v.is_some()).count();
    let nlag = MAX_LAG.min(values.len() / 2);
    if n_valid < 3 || nlag == 0 {
        return ArEstimate::unchanged(values, f64::NAN);
    }
    let order = MAX_ORDER.min(nlag - 1).max(1);

    let acf = nan_acf(values, nlag);
    let ak = acf.get(1).copied().flatten().unwrap_or(f64::NAN);
    let r: Option<Vec<f64>> = acf[..=order].iter().copied().collect();
    let Some(r) = r else {
        debug!(order, "autocorrelation unavailable up to the AR order");
        return ArEstimate::unchanged(values, ak);
    };

    let fit = match levinson(&r, order) {
        Ok(fit) => fit,
        Err(e) => {
            debug!(error = %e, "AR estimation degenerate");
            return ArEstimate::unchanged(values, ak);
        }
    };
    let pacf1 = fit.pacf()[0];
    let bound = z_quantile(1.0 - alpha_ak / 2.0) / (n_valid as f64).sqrt();
    if pacf1.abs() < bound {
        return ArEstimate::unchanged(values, ak);
    }

    let mut out = Vec::with_capacity(values.len());
    out.push(None);
    out.extend(values.windows(2).map(|w| match (w[0], w[1]) {
        (Some(prev), Some(cur)) => Some(cur - ak * prev),
        _ => None,
    }));
    ArEstimate {
        ak,
        significant: true,
        values: out,
    }
}
