//! Mann-Kendall statistics of one value series.

use mk_kendall::{
    PValue, SenSlope, kendall_var, p_value, pairwise_slopes, s_statistic, slope_confidence,
    std_normal_var,
};
use mk_tools::nb_tie;

use crate::config::MkConfig;
use crate::error::TrendError;

/// S, Var(S), Z, p-value and slopes of one series, slopes per second.
#[derive(Debug, Clone)]
pub(crate) struct Core {
    pub n: usize,
    pub s: i64,
    pub var_s: f64,
    pub z: f64,
    /// `None` below `min_points` valid values.
    pub p: Option<PValue>,
    pub slopes: Vec<f64>,
    pub sen: SenSlope,
}

impl Core {
    /// Computes the statistics of `values` at `offsets`, with Var(S)
    /// multiplied by `var_factor`.
    pub fn compute(
        values: &[Option<f64>],
        offsets: &[f64],
        config: &MkConfig,
        var_factor: f64,
    ) -> Result<Self, TrendError> {
        let stat = s_statistic(values, offsets, config.resolution())?;
        let data_ties = nb_tie(values, config.resolution());
        let var_s = kendall_var(stat.n_valid, &data_ties, &stat.time_ties) * var_factor;
        let slopes = pairwise_slopes(values, offsets)?;
        Self::assemble(stat.n_valid, stat.s, var_s, slopes, config)
    }

    /// Sums S, Var(S) and valid counts over `parts` and pools their slopes.
    pub fn pooled<'a>(
        parts: impl IntoIterator<Item = &'a Core>,
        config: &MkConfig,
    ) -> Result<Self, TrendError> {
        let (mut n, mut s, mut var_s) = (0, 0, 0.0);
        let mut slopes = Vec::new();
        for part in parts {
            n += part.n;
            s += part.s;
            var_s += part.var_s;
            slopes.extend_from_slice(&part.slopes);
        }
        Self::assemble(n, s, var_s, slopes, config)
    }

    fn assemble(
        n: usize,
        s: i64,
        var_s: f64,
        slopes: Vec<f64>,
        config: &MkConfig,
    ) -> Result<Self, TrendError> {
        let z = std_normal_var(s, var_s);
        let p = if n >= config.min_points() {
            Some(p_value(n, s, z)?)
        } else {
            None
        };
        let sen = slope_confidence(&slopes, var_s, config.alpha_cl())?;
        Ok(Self {
            n,
            s,
            var_s,
            z,
            p,
            slopes,
            sen,
        })
    }

    /// p-value, NaN when not computed.
    pub fn p_or_nan(&self) -> f64 {
        self.p.map_or(f64::NAN, |pv| pv.p)
    }
}
