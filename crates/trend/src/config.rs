//! Configuration for the Mann-Kendall analysis.

use mk_white::{PwMethod, WhiteConfig};

use crate::error::TrendError;

/// Smallest `min_points` accepted; the exact probability table starts at 4.
const MIN_POINTS_FLOOR: usize = 4;

/// Configuration for [`compute_mk_stat`](crate::compute_mk_stat) and
/// [`compute_mk_multi`](crate::compute_mk_multi).
///
/// # Example
///
/// ```
/// use mk_trend::MkConfig;
/// use mk_white::PwMethod;
///
/// let config = MkConfig::new()
///     .with_pw_method(PwMethod::TfpwY)
///     .with_alpha_mk(0.1);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct MkConfig {
    pw_method: PwMethod,
    alpha_mk: f64,
    alpha_ak: f64,
    alpha_cl: f64,
    alpha_xhomo: f64,
    resolution: f64,
    min_points: usize,
    ess_correction: bool,
}

impl MkConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `pw_method = 3pw`, `alpha_mk = 0.05`, `alpha_ak = 0.05`,
    /// `alpha_cl = 0.10`, `alpha_xhomo = 0.10`, `resolution = 0.0`,
    /// `min_points = 4`, `ess_correction = false`.
    pub fn new() -> Self {
        Self {
            pw_method: PwMethod::ThreePw,
            alpha_mk: 0.05,
            alpha_ak: 0.05,
            alpha_cl: 0.10,
            alpha_xhomo: 0.10,
            resolution: 0.0,
            min_points: MIN_POINTS_FLOOR,
            ess_correction: false,
        }
    }

    /// Sets the pre-whitening method.
    pub fn with_pw_method(mut self, m: PwMethod) -> Self {
        self.pw_method = m;
        self
    }

    /// Sets the significance level of the trend test.
    pub fn with_alpha_mk(mut self, v: f64) -> Self {
        self.alpha_mk = v;
        self
    }

    /// Sets the significance level of the autocorrelation test.
    pub fn with_alpha_ak(mut self, v: f64) -> Self {
        self.alpha_ak = v;
        self
    }

    /// Sets the level of the slope confidence limits.
    pub fn with_alpha_cl(mut self, v: f64) -> Self {
        self.alpha_cl = v;
        self
    }

    /// Sets the level of the seasonal homogeneity test.
    pub fn with_alpha_xhomo(mut self, v: f64) -> Self {
        self.alpha_xhomo = v;
        self
    }

    /// Sets the measurement resolution; smaller differences count as ties.
    pub fn with_resolution(mut self, v: f64) -> Self {
        self.resolution = v;
        self
    }

    /// Sets the number of valid values below which no test is run.
    pub fn with_min_points(mut self, n: usize) -> Self {
        self.min_points = n;
        self
    }

    /// Enables the effective-sample-size correction of Var(S) when no
    /// pre-whitening is requested.
    pub fn with_ess_correction(mut self, on: bool) -> Self {
        self.ess_correction = on;
        self
    }

    /// Returns the pre-whitening method.
    pub fn pw_method(&self) -> PwMethod {
        self.pw_method
    }

    /// Returns the significance level of the trend test.
    pub fn alpha_mk(&self) -> f64 {
        self.alpha_mk
    }

    /// Returns the significance level of the autocorrelation test.
    pub fn alpha_ak(&self) -> f64 {
        self.alpha_ak
    }

    /// Returns the level of the slope confidence limits.
    pub fn alpha_cl(&self) -> f64 {
        self.alpha_cl
    }

    /// Returns the level of the seasonal homogeneity test.
    pub fn alpha_xhomo(&self) -> f64 {
        self.alpha_xhomo
    }

    /// Returns the measurement resolution.
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the minimum number of valid values.
    pub fn min_points(&self) -> usize {
        self.min_points
    }

    /// Returns whether the effective-sample-size correction is enabled.
    pub fn ess_correction(&self) -> bool {
        self.ess_correction
    }

    /// Pre-whitening configuration derived from this one.
    pub fn white_config(&self) -> WhiteConfig {
        WhiteConfig::new().with_alpha_ak(self.alpha_ak)
    }

    /// Validates this configuration.
    ///
    /// Checks that every alpha is in (0, 1), `resolution` is finite and
    /// non-negative and `min_points >= 4`.
    pub fn validate(&self) -> Result<(), TrendError> {
        for (name, v) in [
            ("alpha_mk", self.alpha_mk),
            ("alpha_ak", self.alpha_ak),
            ("alpha_cl", self.alpha_cl),
            ("alpha_xhomo", self.alpha_xhomo),
        ] {
            if !v.is_finite() || v <= 0.0 || v >= 1.0 {
                return Err(TrendError::InvalidConfig {
                    reason: format!("{name} must be in (0, 1), got {v}"),
                });
            }
        }
        if !self.resolution.is_finite() || self.resolution < 0.0 {
            return Err(TrendError::InvalidConfig {
                reason: format!(
                    "resolution must be finite and >= 0, got {}",
                    self.resolution
                ),
            });
        }
        if self.min_points < MIN_POINTS_FLOOR {
            return Err(TrendError::InvalidConfig {
                reason: format!(
                    "min_points must be >= {MIN_POINTS_FLOOR}, got {}",
                    self.min_points
                ),
            });
        }
        Ok(())
    }
}

impl Default for MkConfig {
    fn default() -> Self {
        Self::new()
    }
}
