//! Configuration for pre-whitening.

use mk_tools::SECONDS_PER_DAY;

use crate::error::WhiteError;

/// Configuration for AR(1) estimation and the TFPW-WS iteration.
///
/// # Example
///
/// ```
/// use mk_white::WhiteConfig;
///
/// let config = WhiteConfig::new().with_alpha_ak(0.1).with_max_iterations(20);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug)]
pub struct WhiteConfig {
    alpha_ak: f64,
    min_ak: f64,
    max_iterations: usize,
    ak_tolerance: f64,
    slope_tolerance: f64,
}

impl WhiteConfig {
    /// Creates a new configuration with defaults.
    ///
    /// Defaults: `alpha_ak = 0.05`, `min_ak = 0.05`, `max_iterations = 10`,
    /// `ak_tolerance = 1e-4`, `slope_tolerance = 1e-4` per day (in
    /// per-second units).
    pub fn new() -> Self {
        Self {
            alpha_ak: 0.05,
            min_ak: 0.05,
            max_iterations: 10,
            ak_tolerance: 1e-4,
            slope_tolerance: 1e-4 / SECONDS_PER_DAY,
        }
    }

    /// Sets the significance level of the lag-1 autocorrelation test.
    pub fn with_alpha_ak(mut self, v: f64) -> Self {
        self.alpha_ak = v;
        self
    }

    /// Sets the smallest autocorrelation worth removing.
    pub fn with_min_ak(mut self, v: f64) -> Self {
        self.min_ak = v;
        self
    }

    /// Sets the iteration cap of TFPW-WS.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets the convergence tolerance on the autocorrelation.
    pub fn with_ak_tolerance(mut self, v: f64) -> Self {
        self.ak_tolerance = v;
        self
    }

    /// Sets the convergence tolerance on the slope, per second.
    pub fn with_slope_tolerance(mut self, v: f64) -> Self {
        self.slope_tolerance = v;
        self
    }

    /// Returns the significance level of the lag-1 autocorrelation test.
    pub fn alpha_ak(&self) -> f64 {
        self.alpha_ak
    }

    /// Returns the smallest autocorrelation worth removing.
    pub fn min_ak(&self) -> f64 {
        self.min_ak
    }

    /// Returns the iteration cap of TFPW-WS.
    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Returns the convergence tolerance on the autocorrelation.
    pub fn ak_tolerance(&self) -> f64 {
        self.ak_tolerance
    }

    /// Returns the convergence tolerance on the slope, per second.
    pub fn slope_tolerance(&self) -> f64 {
        self.slope_tolerance
    }

    /// Validates this configuration.
    ///
    /// Checks that `alpha_ak` is in (0, 1), `min_ak` is in [0, 1) and both
    /// tolerances are finite and positive.
    pub fn validate(&self) -> Result<(), WhiteError> {
        if !self.alpha_ak.is_finite() || self.alpha_ak <= 0.0 || self.alpha_ak >= 1.0 {
            return Err(WhiteError::InvalidConfig {
                reason: format!("alpha_ak must be in (0, 1), got {}", self.alpha_ak),
            });
        }
        if !self.min_ak.is_finite() || self.min_ak < 0.0 || self.min_ak >= 1.0 {
            return Err(WhiteError::InvalidConfig {
                reason: format!("min_ak must be in [0, 1), got {}", self.min_ak),
            });
        }
        for (name, v) in [
            ("ak_tolerance", self.ak_tolerance),
            ("slope_tolerance", self.slope_tolerance),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(WhiteError::InvalidConfig {
                    reason: format!("{name} must be finite and > 0, got {v}"),
                });
            }
        }
        Ok(())
    }
}

impl Default for WhiteConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = WhiteConfig::new();
        assert!((cfg.alpha_ak() - 0.05).abs() < f64::EPSILON);
        assert!((cfg.min_ak() - 0.05).abs() < f64::EPSILON);
        assert_eq!(cfg.max_iterations(), 10);
        assert!((cfg.slope_tolerance() * 86_400.0 - 1e-4).abs() < 1e-18);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn validate_alpha() {
        assert!(WhiteConfig::new().with_alpha_ak(0.0).validate().is_err());
        assert!(WhiteConfig::new().with_alpha_ak(1.0).validate().is_err());
        assert!(WhiteConfig::new().with_alpha_ak(f64::NAN).validate().is_err());
    }

    #[test]
    fn validate_min_ak() {
        assert!(WhiteConfig::new().with_min_ak(-0.1).validate().is_err());
        assert!(WhiteConfig::new().with_min_ak(0.0).validate().is_ok());
    }

    #[test]
    fn validate_tolerances() {
        assert!(WhiteConfig::new().with_ak_tolerance(0.0).validate().is_err());
        assert!(
            WhiteConfig::new()
                .with_slope_tolerance(f64::INFINITY)
                .validate()
                .is_err()
        );
    }
}
