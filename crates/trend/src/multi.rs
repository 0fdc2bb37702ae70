//! Seasonal Kendall pooling across segments.

use mk_series::Segment;
use mk_tools::nan_median;
use mk_white::PwMethod;
use statrs::distribution::{ChiSquared, ContinuousCDF};
use tracing::warn;

use crate::config::MkConfig;
use crate::engine::Core;
use crate::error::TrendError;
use crate::result::{MkResult, MultiResult, Verdict, Whitening};
use crate::stat::{Evaluated, evaluate};

/// Label of the pooled result.
pub const POOLED_LABEL: &str = "pooled";

/// Tests every segment and pools them into one seasonal Kendall result.
///
/// S and Var(S) are summed over the segments with at least `min_points`
/// valid values (per method for 3PW), the pooled slope is the median of
/// the union of all within-segment pairwise slopes, and the pooled p-value
/// uses the exact table when the total valid count is at most 10. A segment
/// whose analysis fails keeps a degenerate result and does not enter the
/// pool.
///
/// Homogeneity of the segment trends is tested with
/// `Σ Z_i² - K mean(Z)²` against the `1 - alpha_xhomo` quantile of χ²(K-1).
///
/// # Errors
///
/// Returns [`TrendError::InvalidConfig`] for an invalid `config`.
#[tracing::instrument(skip_all, fields(segments = segments.len()))]
pub fn compute_mk_multi(
    segments: &[Segment],
    config: &MkConfig,
) -> Result<MultiResult, TrendError> {
    config.validate()?;

    let evaluated: Vec<Evaluated> = segments
        .iter()
        .map(|seg| {
            evaluate(seg, config).unwrap_or_else(|e| {
                warn!(label = seg.label(), error = %e, "segment analysis failed");
                Evaluated::insufficient(seg, config)
            })
        })
        .collect();
    let tested: Vec<&Evaluated> = evaluated.iter().filter(|e| e.main.is_some()).collect();

    let pooled = pool(&tested, config)?;
    let (xhomo, homogeneous) = homogeneity(&tested, config.alpha_xhomo());
    if homogeneous == Some(false) {
        warn!(xhomo, "segment trends are not homogeneous");
    }

    Ok(MultiResult {
        segments: evaluated.into_iter().map(|e| e.result).collect(),
        pooled,
        xhomo,
        homogeneous,
    })
}

fn pool(tested: &[&Evaluated], config: &MkConfig) -> Result<MkResult, TrendError> {
    let values: Vec<Option<f64>> = tested.iter().flat_map(|e| e.values.iter().copied()).collect();
    if tested.is_empty() {
        return Ok(MkResult::insufficient(POOLED_LABEL, &values, config.pw_method()));
    }

    let main = Core::pooled(tested.iter().filter_map(|e| e.main.as_ref()), config)?;
    let verdict = if config.pw_method() == PwMethod::ThreePw {
        let pw = Core::pooled(tested.iter().filter_map(|e| e.pw.as_ref()), config)?;
        let tfpw_y = Core::pooled(tested.iter().filter_map(|e| e.tfpw_y.as_ref()), config)?;
        Verdict::three_pw(&pw, &tfpw_y, &main, config.alpha_mk())
    } else {
        Verdict::single(&main, config.alpha_mk())
    };

    let aks: Vec<Option<f64>> = tested
        .iter()
        .map(|e| Some(e.result.ak).filter(|ak| ak.is_finite()))
        .collect();
    let applied = tested
        .iter()
        .map(|e| e.result.pw_applied)
        .find(|m| *m != PwMethod::None)
        .unwrap_or(PwMethod::None);
    let whitening = Whitening {
        requested: config.pw_method(),
        applied,
        ak: nan_median(&aks).unwrap_or(f64::NAN),
    };
    Ok(MkResult::from_core(POOLED_LABEL, &main, verdict, &values, whitening))
}

/// `(xhomo, homogeneous)` over the Z of the tested segments.
fn homogeneity(tested: &[&Evaluated], alpha_xhomo: f64) -> (f64, Option<bool>) {
    let z: Vec<f64> = tested
        .iter()
        .filter_map(|e| e.main.as_ref())
        .map(|c| c.z)
        .collect();
    let k = z.len();
    if k < 2 {
        return (f64::NAN, None);
    }
    let mean = z.iter().sum::<f64>() / k as f64;
    let xhomo = z.iter().map(|zi| zi * zi).sum::<f64>() - k as f64 * mean * mean;
    let critical = ChiSquared::new((k - 1) as f64)
        .expect("at least one degree of freedom")
        .inverse_cdf(1.0 - alpha_xhomo);
    (xhomo, Some(xhomo <= critical))
}
