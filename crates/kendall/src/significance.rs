//! p-values, trend classification and the 3PW significance combination.

use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

use crate::error::KendallError;
use crate::table::{EXACT_MAX_N, prob_mk_n};

/// Which distribution produced a p-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PBasis {
    /// Two-sided normal approximation on Z.
    Normal,
    /// Exact small-sample table, one-sided.
    Exact,
}

/// A p-value with its basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PValue {
    /// Probability.
    pub p: f64,
    /// Distribution used.
    pub basis: PBasis,
}

/// Direction of a detected trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Significant positive trend.
    Increasing,
    /// Significant negative trend.
    Decreasing,
    /// No significant trend.
    NoTrend,
    /// Too few valid values to test.
    InsufficientData,
}

/// Outcome of combining PW and TFPW-Y p-values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThreePwVerdict {
    /// Both methods are significant.
    Significant,
    /// Only TFPW-Y is significant, likely an inflated false positive.
    FalsePositiveTfpwY,
    /// Only PW is significant.
    FalsePositivePw,
    /// Neither method is significant.
    NotSignificant,
}

/// Combined 3PW probability and verdict.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThreePwOutcome {
    /// The larger of the two p-values.
    pub p: f64,
    /// Verdict.
    pub verdict: ThreePwVerdict,
}

impl ThreePwOutcome {
    /// Significance code: the percent level for a significant result,
    /// -1 or -2 for a one-sided disagreement, 0 otherwise.
    pub fn significance(&self) -> i32 {
        match self.verdict {
            ThreePwVerdict::Significant => significance_level(self.p),
            ThreePwVerdict::FalsePositiveTfpwY => -1,
            ThreePwVerdict::FalsePositivePw => -2,
            ThreePwVerdict::NotSignificant => 0,
        }
    }
}

pub(crate) fn std_normal() -> Normal {
    Normal::new(0.0, 1.0).expect("unit normal parameters are valid")
}

/// Standard normal quantile.
pub fn z_quantile(p: f64) -> f64 {
    std_normal().inverse_cdf(p)
}

/// p-value for statistic `s` with `n` valid values and standardised `z`.
///
/// Up to [`EXACT_MAX_N`] values the exact table is read at `(n, |S|)`;
/// beyond it `p = 2 (1 - Φ(|z|))`.
///
/// The two bases differ in sidedness: the exact value is the one-sided
/// tail `P(S >= |s|)` while the normal value is two-sided. Both are
/// compared with the same `alpha_mk` by [`classify`], so up to `n = 10` a
/// trend in either direction is accepted at twice the nominal level. Read
/// [`PValue::basis`] before treating `p` as two-sided.
///
/// # Errors
///
/// Returns [`KendallError::TableRange`] on the exact path when `n < 4`.
pub fn p_value(n: usize, s: i64, z: f64) -> Result<PValue, KendallError> {
    if n <= EXACT_MAX_N {
        return Ok(PValue {
            p: prob_mk_n(n, s)?,
            basis: PBasis::Exact,
        });
    }
    Ok(PValue {
        p: 2.0 * std_normal().sf(z.abs()),
        basis: PBasis::Normal,
    })
}

/// Trend direction at level `alpha_mk`, by the sign of S.
pub fn classify(s: i64, p: f64, alpha_mk: f64) -> Trend {
    if p.is_nan() || p > alpha_mk || s == 0 {
        return Trend::NoTrend;
    }
    if s > 0 {
        Trend::Increasing
    } else {
        Trend::Decreasing
    }
}

/// Percent significance level reached: 95, 90 or 0.
pub fn significance_level(p: f64) -> i32 {
    if p <= 0.05 {
        95
    } else if p <= 0.1 {
        90
    } else {
        0
    }
}

/// Combines the PW and TFPW-Y p-values of the 3PW method.
///
/// The combined probability is the larger of the two. A NaN on either side
/// yields a NaN probability and [`ThreePwVerdict::NotSignificant`].
pub fn prob_3pw(p_pw: f64, p_tfpw_y: f64, alpha_mk: f64) -> ThreePwOutcome {
    if p_pw.is_nan() || p_tfpw_y.is_nan() {
        return ThreePwOutcome {
            p: f64::NAN,
            verdict: ThreePwVerdict::NotSignificant,
        };
    }
    let pw_sig = p_pw <= alpha_mk;
    let y_sig = p_tfpw_y <= alpha_mk;
    let verdict = match (pw_sig, y_sig) {
        (true, true) => ThreePwVerdict::Significant,
        (false, true) => ThreePwVerdict::FalsePositiveTfpwY,
        (true, false) => ThreePwVerdict::FalsePositivePw,
        (false, false) => ThreePwVerdict::NotSignificant,
    };
    ThreePwOutcome {
        p: p_pw.max(p_tfpw_y),
        verdict,
    }
}
