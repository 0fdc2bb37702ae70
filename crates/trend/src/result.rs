//! Per-segment and pooled results.

use mk_kendall::{PBasis, ThreePwVerdict, Trend, classify, prob_3pw, significance_level};
use mk_tools::{SECONDS_PER_YEAR, nan_median};
use mk_white::PwMethod;
use serde::Serialize;

use crate::engine::Core;
use crate::error::TrendError;

/// Outcome of the Mann-Kendall test on one segment, or of a pooled set.
///
/// Slopes and confidence limits are in value units per year (365.25 days);
/// the `_pct` fields divide them by `|median|`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MkResult {
    /// Label of the analysed segment.
    pub label: String,
    /// Number of valid values entering S.
    pub n: usize,
    /// Mann-Kendall statistic.
    pub s: i64,
    /// Variance of S.
    pub var_s: f64,
    /// Standardised statistic.
    pub z: f64,
    /// p-value (NaN when not computed).
    pub p: f64,
    /// Distribution that produced `p`.
    pub p_basis: Option<PBasis>,
    /// 95, 90 or 0; for 3PW also -1 (only TFPW-Y significant) or -2 (only
    /// PW significant).
    pub significance: i32,
    /// Trend direction.
    pub trend: Trend,
    /// Sen's slope per year.
    pub slope: f64,
    /// Lower confidence limit of the slope per year.
    pub lcl: f64,
    /// Upper confidence limit of the slope per year.
    pub ucl: f64,
    /// Median of the analysed values.
    pub median: f64,
    /// Slope in percent of `|median|` per year.
    pub slope_pct: f64,
    /// Lower limit in percent of `|median|` per year.
    pub lcl_pct: f64,
    /// Upper limit in percent of `|median|` per year.
    pub ucl_pct: f64,
    /// Lag-1 autocorrelation used by the applied method.
    pub ak: f64,
    /// Pre-whitening method requested.
    pub pw_requested: PwMethod,
    /// Pre-whitening method applied after fallbacks.
    pub pw_applied: PwMethod,
}

/// Per-segment results with the pooled (seasonal Kendall) result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiResult {
    /// One result per input segment, in input order.
    pub segments: Vec<MkResult>,
    /// Result of the summed S and Var(S).
    pub pooled: MkResult,
    /// Homogeneity statistic `Σ Z_i² - K mean(Z)²` (NaN below 2 segments).
    pub xhomo: f64,
    /// Whether the segment trends are homogeneous; `None` below 2 tested
    /// segments.
    pub homogeneous: Option<bool>,
}

/// p-value, significance code and direction.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Verdict {
    pub p: f64,
    pub basis: Option<PBasis>,
    pub significance: i32,
    pub trend: Trend,
}

impl Verdict {
    /// Verdict of a single series.
    pub fn single(core: &Core, alpha_mk: f64) -> Self {
        match core.p {
            Some(pv) => Self {
                p: pv.p,
                basis: Some(pv.basis),
                significance: significance_level(pv.p),
                trend: classify(core.s, pv.p, alpha_mk),
            },
            None => Self {
                p: f64::NAN,
                basis: None,
                significance: 0,
                trend: Trend::InsufficientData,
            },
        }
    }

    /// 3PW verdict: significance from PW and TFPW-Y, direction from the
    /// slope series.
    pub fn three_pw(pw: &Core, tfpw_y: &Core, slope: &Core, alpha_mk: f64) -> Self {
        let outcome = prob_3pw(pw.p_or_nan(), tfpw_y.p_or_nan(), alpha_mk);
        let basis = if outcome.p.is_nan() {
            None
        } else if pw.p_or_nan() >= tfpw_y.p_or_nan() {
            pw.p.map(|pv| pv.basis)
        } else {
            tfpw_y.p.map(|pv| pv.basis)
        };
        let trend = match outcome.verdict {
            ThreePwVerdict::Significant => classify(slope.s, outcome.p, alpha_mk),
            _ => Trend::NoTrend,
        };
        Self {
            p: outcome.p,
            basis,
            significance: outcome.significance(),
            trend,
        }
    }
}

/// Method and autocorrelation recorded with a result.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Whitening {
    pub requested: PwMethod,
    pub applied: PwMethod,
    pub ak: f64,
}

impl MkResult {
    pub(crate) fn from_core(
        label: &str,
        core: &Core,
        verdict: Verdict,
        values: &[Option<f64>],
        whitening: Whitening,
    ) -> Self {
        let median = nan_median(values).unwrap_or(f64::NAN);
        let per_year = core.sen.scaled(SECONDS_PER_YEAR);
        let pct = |x: f64| x * 100.0 / median.abs();
        Self {
            label: label.to_string(),
            n: core.n,
            s: core.s,
            var_s: core.var_s,
            z: core.z,
            p: verdict.p,
            p_basis: verdict.basis,
            significance: verdict.significance,
            trend: verdict.trend,
            slope: per_year.slope,
            lcl: per_year.lcl,
            ucl: per_year.ucl,
            median,
            slope_pct: pct(per_year.slope),
            lcl_pct: pct(per_year.lcl),
            ucl_pct: pct(per_year.ucl),
            ak: whitening.ak,
            pw_requested: whitening.requested,
            pw_applied: whitening.applied,
        }
    }

    /// Result of a segment too short to test: S = 0 and NaN slope.
    pub(crate) fn insufficient(label: &str, values: &[Option<f64>], requested: PwMethod) -> Self {
        Self {
            label: label.to_string(),
            n: values.iter().filter(|v| v.is_some()).count(),
            s: 0,
            var_s: 0.0,
            z: 0.0,
            p: f64::NAN,
            p_basis: None,
            significance: 0,
            trend: Trend::InsufficientData,
            slope: f64::NAN,
            lcl: f64::NAN,
            ucl: f64::NAN,
            median: nan_median(values).unwrap_or(f64::NAN),
            slope_pct: f64::NAN,
            lcl_pct: f64::NAN,
            ucl_pct: f64::NAN,
            ak: f64::NAN,
            pw_requested: requested,
            pw_applied: PwMethod::None,
        }
    }
}

/// Pretty JSON of a result; non-finite numbers are written as `null`.
///
/// # Errors
///
/// Returns [`TrendError::Serialization`] if serialization fails.
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, TrendError> {
    serde_json::to_string_pretty(value).map_err(|e| TrendError::Serialization {
        reason: e.to_string(),
    })
}
