//! Mann-Kendall test of a single segment.

use mk_kendall::{SenSlope, ess_factor};
use mk_series::Segment;
use mk_tools::SECONDS_PER_YEAR;
use mk_white::{PwMethod, prewhite, prewhiten};
use tracing::debug;

use crate::config::MkConfig;
use crate::engine::Core;
use crate::error::TrendError;
use crate::result::{MkResult, Verdict, Whitening};

/// A segment result with the statistics needed for pooling.
#[derive(Debug, Clone)]
pub(crate) struct Evaluated {
    pub result: MkResult,
    /// Statistics of the series the slope comes from; `None` when the
    /// segment was too short.
    pub main: Option<Core>,
    /// 3PW only.
    pub pw: Option<Core>,
    /// 3PW only.
    pub tfpw_y: Option<Core>,
    /// Values of the slope series.
    pub values: Vec<Option<f64>>,
}

impl Evaluated {
    pub fn insufficient(segment: &Segment, config: &MkConfig) -> Self {
        Self {
            result: MkResult::insufficient(segment.label(), segment.values(), config.pw_method()),
            main: None,
            pw: None,
            tfpw_y: None,
            values: segment.values().to_vec(),
        }
    }
}

/// Runs the Mann-Kendall test and Sen's slope on `segment`.
///
/// Fewer than `min_points` valid values give a degenerate result with
/// [`Trend::InsufficientData`](mk_kendall::Trend::InsufficientData). The
/// segment is pre-whitened with the configured method first; for
/// [`PwMethod::ThreePw`] the p-value combines PW and TFPW-Y while S, Z and
/// the slope come from the VCTFPW series.
///
/// # Errors
///
/// | Variant | Trigger |
/// |---------|---------|
/// | [`TrendError::InvalidConfig`] | `config` fails validation |
/// | [`TrendError::White`] | pre-whitening input errors |
/// | [`TrendError::Kendall`] | statistics input errors |
#[tracing::instrument(skip(segment, config), fields(label = segment.label(), n = segment.len()))]
pub fn compute_mk_stat(segment: &Segment, config: &MkConfig) -> Result<MkResult, TrendError> {
    config.validate()?;
    Ok(evaluate(segment, config)?.result)
}

pub(crate) fn evaluate(segment: &Segment, config: &MkConfig) -> Result<Evaluated, TrendError> {
    let n_valid = segment.n_valid();
    if n_valid < config.min_points() {
        debug!(n_valid, min_points = config.min_points(), "insufficient data");
        return Ok(Evaluated::insufficient(segment, config));
    }

    let label = segment.label();
    let offsets = segment.offsets();
    let alpha_mk = config.alpha_mk();
    let requested = config.pw_method();

    match requested {
        PwMethod::None => {
            let factor = if config.ess_correction() {
                ess_factor(segment.values(), offsets, config.alpha_ak())?
            } else {
                1.0
            };
            if factor != 1.0 {
                debug!(factor, "effective sample size correction");
            }
            let main = Core::compute(segment.values(), offsets, config, factor)?;
            let whitening = Whitening {
                requested,
                applied: PwMethod::None,
                ak: f64::NAN,
            };
            let verdict = Verdict::single(&main, alpha_mk);
            Ok(Evaluated {
                result: MkResult::from_core(label, &main, verdict, segment.values(), whitening),
                main: Some(main),
                pw: None,
                tfpw_y: None,
                values: segment.values().to_vec(),
            })
        }
        PwMethod::ThreePw => {
            let all = prewhite(segment, &config.white_config())?;
            let pw = Core::compute(all.pw.segment.values(), offsets, config, 1.0)?;
            let tfpw_y = Core::compute(all.tfpw_y.segment.values(), offsets, config, 1.0)?;
            let main = Core::compute(all.vctfpw.segment.values(), offsets, config, 1.0)?;
            let applied = if all.pw.applied == PwMethod::None {
                PwMethod::None
            } else {
                PwMethod::ThreePw
            };
            let whitening = Whitening {
                requested,
                applied,
                ak: all.vctfpw.ak,
            };
            let verdict = Verdict::three_pw(&pw, &tfpw_y, &main, alpha_mk);
            let values = all.vctfpw.segment.values().to_vec();
            Ok(Evaluated {
                result: MkResult::from_core(label, &main, verdict, &values, whitening),
                main: Some(main),
                pw: Some(pw),
                tfpw_y: Some(tfpw_y),
                values,
            })
        }
        method => {
            let whitened = prewhiten(segment, method, &config.white_config())?;
            let values = whitened.segment.values().to_vec();
            let main = Core::compute(&values, offsets, config, 1.0)?;
            let whitening = Whitening {
                requested,
                applied: whitened.applied,
                ak: whitened.ak,
            };
            let verdict = Verdict::single(&main, alpha_mk);
            Ok(Evaluated {
                result: MkResult::from_core(label, &main, verdict, &values, whitening),
                main: Some(main),
                pw: None,
                tfpw_y: None,
                values,
            })
        }
    }
}

/// S and Var(S) of the raw values of `segment`, with data ties at the
/// configured resolution and time ties.
///
/// # Errors
///
/// Returns [`TrendError::InvalidConfig`] for an invalid `config`.
pub fn s_test(segment: &Segment, config: &MkConfig) -> Result<(i64, f64), TrendError> {
    config.validate()?;
    let core = Core::compute(segment.values(), segment.offsets(), config, 1.0)?;
    Ok((core.s, core.var_s))
}

/// Sen's slope of the raw values of `segment` with its confidence limits at
/// `alpha_cl`, per year.
///
/// # Errors
///
/// Returns [`TrendError::InvalidConfig`] for an invalid `config`.
pub fn sen_slope(segment: &Segment, config: &MkConfig) -> Result<SenSlope, TrendError> {
    config.validate()?;
    let core = Core::compute(segment.values(), segment.offsets(), config, 1.0)?;
    Ok(core.sen.scaled(SECONDS_PER_YEAR))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use mk_kendall::Trend;

    fn yearly(values: &[f64]) -> Segment {
        let start = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let deltas = vec![SECONDS_PER_YEAR; values.len() - 1];
        Segment::from_deltas(start, &deltas, values.iter().map(|&x| Some(x)).collect()).unwrap()
    }

    #[test]
    fn short_segment_is_degenerate() {
        let seg = yearly(&[1.0, 2.0, 3.0]);
        let r = compute_mk_stat(&seg, &MkConfig::new()).unwrap();
        assert_eq!(r.trend, Trend::InsufficientData);
        assert_eq!(r.s, 0);
        assert!(r.lcl.is_nan() && r.ucl.is_nan());
    }

    #[test]
    fn invalid_config_fails_fast() {
        let seg = yearly(&[1.0, 2.0, 3.0, 4.0]);
        let config = MkConfig::new().with_alpha_mk(2.0);
        assert!(matches!(
            compute_mk_stat(&seg, &config),
            Err(TrendError::InvalidConfig { .. })
        ));
        assert!(s_test(&seg, &config).is_err());
        assert!(sen_slope(&seg, &config).is_err());
    }

    #[test]
    fn s_test_and_sen_slope_on_raw_values() {
        let seg = yearly(&[1.0, 3.0, 2.0, 5.0, 4.0, 6.0]);
        let (s, var) = s_test(&seg, &MkConfig::new()).unwrap();
        assert_eq!(s, 11);
        assert_relative_eq!(var, 6.0 * 5.0 * 17.0 / 18.0, epsilon = 1e-9);
        let sen = sen_slope(&seg, &MkConfig::new()).unwrap();
        assert_relative_eq!(sen.slope, 1.0, epsilon = 1e-9);
        assert!(sen.lcl <= sen.slope && sen.slope <= sen.ucl);
    }

    #[test]
    fn ess_only_without_prewhitening() {
        // blocks of ten equal values
        let values: Vec<f64> = (0..40).map(|i| ((i / 10) % 2) as f64).collect();
        let seg = yearly(&values);
        let plain = MkConfig::new().with_pw_method(PwMethod::None);
        let factor = ess_factor(seg.values(), seg.offsets(), plain.alpha_ak()).unwrap();
        assert!(factor > 1.5, "factor = {factor}");

        let base = compute_mk_stat(&seg, &plain).unwrap();
        let corrected = compute_mk_stat(&seg, &plain.clone().with_ess_correction(true)).unwrap();
        assert_eq!(base.s, corrected.s);
        assert_relative_eq!(corrected.var_s, base.var_s * factor, max_relative = 1e-12);
        assert!(base.ak.is_nan());
        assert_eq!(corrected.pw_applied, PwMethod::None);

        let tfpw_y = MkConfig::new().with_pw_method(PwMethod::TfpwY);
        let whitened = compute_mk_stat(&seg, &tfpw_y).unwrap();
        let ignored = compute_mk_stat(&seg, &tfpw_y.with_ess_correction(true)).unwrap();
        assert_eq!(whitened.var_s, ignored.var_s);
        assert_eq!(whitened.s, ignored.s);
    }

    #[test]
    fn fine_resolution_over_wide_range() {
        let values: Vec<f64> = (0..12).map(|i| f64::from(i) * 1000.0 / 11.0).collect();
        let config = MkConfig::new()
            .with_pw_method(PwMethod::None)
            .with_resolution(1e-9);
        let r = compute_mk_stat(&yearly(&values), &config).unwrap();
        assert_eq!(r.s, 66);
        assert_relative_eq!(r.var_s, 12.0 * 11.0 * 29.0 / 18.0, epsilon = 1e-9);
        assert_eq!(r.trend, Trend::Increasing);
    }

    #[test]
    fn three_pw_on_uncorrelated_falls_back() {
        let seg = yearly(&[1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0, 1.0, 1.0, -1.0, -1.0]);
        let r = compute_mk_stat(&seg, &MkConfig::new()).unwrap();
        assert_eq!(r.pw_requested, PwMethod::ThreePw);
        assert_eq!(r.pw_applied, PwMethod::None);
        let raw = compute_mk_stat(&seg, &MkConfig::new().with_pw_method(PwMethod::None)).unwrap();
        assert_eq!(r.s, raw.s);
        assert_relative_eq!(r.p, raw.p);
    }
}
