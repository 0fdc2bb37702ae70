//! The pre-whitened series of every method, computed together.

use mk_kendall::pairwise_slopes;
use mk_series::Segment;
use mk_tools::{median, nan_variance};
use tracing::debug;

use crate::ar::{ArEstimate, nanprewhite_ar};
use crate::config::WhiteConfig;
use crate::error::WhiteError;
use crate::method::PwMethod;

/// A pre-whitened segment and the correction actually applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Whitened {
    /// Same timestamps as the input, transformed values.
    pub segment: Segment,
    /// Method that was applied; [`PwMethod::None`] after a fallback.
    pub applied: PwMethod,
    /// Lag-1 autocorrelation used by the applied method (NaN if none).
    pub ak: f64,
}

impl Whitened {
    fn unchanged(segment: &Segment, ak: f64) -> Self {
        Self {
            segment: segment.clone(),
            applied: PwMethod::None,
            ak,
        }
    }
}

/// Output of [`prewhite`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prewhitened {
    /// AR(1) removed from the raw series.
    pub pw: Whitened,
    /// `pw / (1 - ak)`.
    pub pw_cor: Vec<Option<f64>>,
    /// Yue et al. trend-free pre-whitening.
    pub tfpw_y: Whitened,
    /// Wang & Swail iterative pre-whitening.
    pub tfpw_ws: Whitened,
    /// Variance-corrected trend-free pre-whitening.
    pub vctfpw: Whitened,
}

impl Prewhitened {
    /// Output for a single-series method; [`PwMethod::ThreePw`] maps to the
    /// VCTFPW series its slope comes from, [`PwMethod::None`] to `None`.
    pub fn get(&self, method: PwMethod) -> Option<&Whitened> {
        match method {
            PwMethod::None => None,
            PwMethod::Pw => Some(&self.pw),
            PwMethod::TfpwY => Some(&self.tfpw_y),
            PwMethod::TfpwWs => Some(&self.tfpw_ws),
            PwMethod::Vctfpw | PwMethod::ThreePw => Some(&self.vctfpw),
        }
    }
}

/// Builds the PW, TFPW-Y, TFPW-WS and VCTFPW series of `segment`.
///
/// Nothing is corrected unless the raw lag-1 autocorrelation is significant
/// and at least `min_ak`; every series is then the input unchanged with
/// [`PwMethod::None`] recorded. TFPW-WS falls back to the TFPW-Y output
/// when its own autocorrelation is not estimable.
///
/// # Errors
///
/// Returns [`WhiteError::InvalidConfig`] for an invalid `config`.
pub fn prewhite(segment: &Segment, config: &WhiteConfig) -> Result<Prewhitened, WhiteError> {
    config.validate()?;
    let obs = segment.values();
    let t = segment.offsets();
    let alpha = config.alpha_ak();

    let raw = nanprewhite_ar(obs, alpha);
    let removable =
        raw.significant && raw.ak >= config.min_ak() && raw.values.iter().any(Option::is_some);
    if !removable {
        debug!(ak = raw.ak, significant = raw.significant, "no autocorrelation to remove");
        return Ok(Prewhitened {
            pw: Whitened::unchanged(segment, raw.ak),
            pw_cor: obs.to_vec(),
            tfpw_y: Whitened::unchanged(segment, f64::NAN),
            tfpw_ws: Whitened::unchanged(segment, f64::NAN),
            vctfpw: Whitened::unchanged(segment, f64::NAN),
        });
    }

    let pw = Whitened {
        segment: segment.with_values(raw.values.clone())?,
        applied: PwMethod::Pw,
        ak: raw.ak,
    };
    let pw_cor: Vec<Option<f64>> = raw
        .values
        .iter()
        .map(|v| v.map(|x| x / (1.0 - raw.ak)))
        .collect();

    let b0_or = sen(obs, t)?;
    let b0_pw = sen(&pw_cor, t)?;
    let ar_or = nanprewhite_ar(&detrend(obs, t, b0_or), alpha);

    let tfpw_y = if ar_or.significant {
        Whitened {
            segment: segment.with_values(retrend(&ar_or.values, t, b0_or))?,
            applied: PwMethod::TfpwY,
            ak: ar_or.ak,
        }
    } else {
        debug!(ak = ar_or.ak, "tfpw_y: detrended autocorrelation not significant");
        Whitened::unchanged(segment, ar_or.ak)
    };

    let tfpw_ws = match wang_swail(obs, t, b0_pw, raw.ak, config)? {
        Some((values, ak)) => Whitened {
            segment: segment.with_values(values)?,
            applied: PwMethod::TfpwWs,
            ak,
        },
        None => {
            debug!(fallback = %tfpw_y.applied, "tfpw_ws not estimable");
            tfpw_y.clone()
        }
    };

    let vctfpw = if ar_or.significant {
        Whitened {
            segment: segment.with_values(variance_corrected(obs, t, &ar_or, b0_or))?,
            applied: PwMethod::Vctfpw,
            ak: ar_or.ak,
        }
    } else {
        debug!(ak = ar_or.ak, "vctfpw: detrended autocorrelation not significant");
        Whitened::unchanged(segment, ar_or.ak)
    };

    Ok(Prewhitened {
        pw,
        pw_cor,
        tfpw_y,
        tfpw_ws,
        vctfpw,
    })
}

/// Iterates slope and autocorrelation on `(x[t] - ak x[t-1]) / (1 - ak)`.
///
/// Returns `None` when the starting autocorrelation is not estimable.
fn wang_swail(
    obs: &[Option<f64>],
    t: &[f64],
    b0: f64,
    ak_raw: f64,
    config: &WhiteConfig,
) -> Result<Option<(Vec<Option<f64>>, f64)>, WhiteError> {
    let alpha = config.alpha_ak();
    let usable = |est: &ArEstimate| est.significant && est.ak >= config.min_ak() && est.ak < 1.0;

    let first = nanprewhite_ar(&detrend(obs, t, b0), alpha);
    if !usable(&first) {
        return Ok(None);
    }

    let mut ak = first.ak;
    let mut current = blend(obs, ak);
    let mut b1 = sen(&current, t)?;
    let mut ak_prev = ak_raw;
    let mut b_prev = b0;
    let mut loops = 0;

    while (ak - ak_prev).abs() > config.ak_tolerance()
        && (b1 - b_prev).abs() > config.slope_tolerance()
        && loops < config.max_iterations()
    {
        loops += 1;
        let est = nanprewhite_ar(&detrend(obs, t, b1), alpha);
        ak_prev = ak;
        b_prev = b1;
        if !usable(&est) {
            debug!(loops, ak = est.ak, "tfpw_ws: iteration stopped, autocorrelation lost");
            break;
        }
        ak = est.ak;
        current = blend(obs, ak);
        b1 = sen(&current, t)?;
    }
    debug!(loops, ak, slope = b1, "tfpw_ws converged");
    Ok(Some((current, ak)))
}

/// Median pairwise slope, NaN when no pair exists.
fn sen(values: &[Option<f64>], t: &[f64]) -> Result<f64, WhiteError> {
    let mut slopes = pairwise_slopes(values, t)?;
    if slopes.is_empty() {
        return Ok(f64::NAN);
    }
    slopes.sort_by(f64::total_cmp);
    Ok(median(&slopes))
}

fn detrend(values: &[Option<f64>], t: &[f64], b: f64) -> Vec<Option<f64>> {
    values
        .iter()
        .zip(t)
        .map(|(v, &ti)| v.map(|x| x - b * ti).filter(|x| x.is_finite()))
        .collect()
}

fn retrend(values: &[Option<f64>], t: &[f64], b: f64) -> Vec<Option<f64>> {
    detrend(values, t, -b)
}

/// First value kept, then `(x[t] - ak x[t-1]) / (1 - ak)`.
fn blend(obs: &[Option<f64>], ak: f64) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(obs.len());
    out.extend(obs.first().copied());
    out.extend(obs.windows(2).map(|w| match (w[0], w[1]) {
        (Some(prev), Some(cur)) => Some((cur - ak * prev) / (1.0 - ak)),
        _ => None,
    }));
    out
}

/// AR-removed detrended series rescaled to the spread of `obs`, with the
/// slope deflated by `sqrt((1 + ak) / (1 - ak))` re-added.
fn variance_corrected(
    obs: &[Option<f64>],
    t: &[f64],
    ar_or: &ArEstimate,
    b0: f64,
) -> Vec<Option<f64>> {
    let scale = match (nan_variance(obs), nan_variance(&ar_or.values)) {
        (Some(v_obs), Some(v_ar)) if v_ar > 0.0 => (v_obs / v_ar).sqrt(),
        _ => 1.0,
    };
    let b_vc = if ar_or.ak >= 0.0 {
        b0 / ((1.0 + ar_or.ak) / (1.0 - ar_or.ak)).sqrt()
    } else {
        b0
    };
    let rescaled: Vec<Option<f64>> = ar_or.values.iter().map(|v| v.map(|x| x * scale)).collect();
    retrend(&rescaled, t, b_vc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn blend_keeps_first_value() {
        let out = blend(&[Some(1.0), Some(2.0), None, Some(4.0)], 0.5);
        assert_eq!(out[0], Some(1.0));
        assert_relative_eq!(out[1].unwrap(), 3.0);
        assert_eq!(out[2], None);
        assert_eq!(out[3], None);
    }

    #[test]
    fn detrend_and_retrend_invert() {
        let values = vec![Some(1.0), None, Some(3.0)];
        let t = [0.0, 1.0, 2.0];
        let back = retrend(&detrend(&values, &t, 0.7), &t, 0.7);
        assert_relative_eq!(back[0].unwrap(), 1.0);
        assert_eq!(back[1], None);
        assert_relative_eq!(back[2].unwrap(), 3.0, epsilon = 1e-12);
    }

    #[test]
    fn nan_slope_clears_values() {
        let out = detrend(&[Some(1.0)], &[1.0], f64::NAN);
        assert_eq!(out, vec![None]);
    }

    #[test]
    fn sen_of_line() {
        let values: Vec<Option<f64>> = (0..5).map(|i| Some(2.0 * i as f64)).collect();
        let t: Vec<f64> = (0..5).map(|i| i as f64).collect();
        assert_relative_eq!(sen(&values, &t).unwrap(), 2.0);
        assert!(sen(&[Some(1.0)], &[0.0]).unwrap().is_nan());
    }
}
