//! Error types for the mk-kendall crate.

/// Error type for all fallible operations in the mk-kendall crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KendallError {
    /// Returned when the exact probability table has no entry for the
    /// requested sample size or statistic.
    #[error("no exact probability for n = {n}, S = {s} (table covers n = 4..=10)")]
    TableRange {
        /// Number of valid values.
        n: usize,
        /// Mann-Kendall statistic.
        s: i64,
    },

    /// Returned when values and time offsets differ in length.
    #[error("length mismatch: {values} values, {offsets} time offsets")]
    LengthMismatch {
        /// Number of values.
        values: usize,
        /// Number of time offsets.
        offsets: usize,
    },

    /// Returned when a significance level is outside (0, 1).
    #[error("invalid {name}: {value} (must be in (0, 1))")]
    InvalidAlpha {
        /// Name of the significance level.
        name: &'static str,
        /// The offending value.
        value: f64,
    },
}

pub(crate) fn check_lengths(values: usize, offsets: usize) -> Result<(), KendallError> {
    if values != offsets {
        return Err(KendallError::LengthMismatch { values, offsets });
    }
    Ok(())
}

pub(crate) fn check_alpha(name: &'static str, value: f64) -> Result<(), KendallError> {
    if value.is_nan() || value <= 0.0 || value >= 1.0 {
        return Err(KendallError::InvalidAlpha { name, value });
    }
    Ok(())
}
