//! Error types for the mk-tools crate.

/// Error type for all fallible operations in the mk-tools crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolsError {
    /// Returned when a duration cannot be expressed as finite seconds.
    #[error("invalid duration: {reason}")]
    InvalidDuration {
        /// Description of the problem.
        reason: String,
    },

    /// Returned when the Levinson-Durbin recursion meets a singular
    /// Toeplitz system.
    #[error("singular Toeplitz system at order {order} (reflection coefficient {reflection})")]
    SingularSystem {
        /// Recursion order (1-based) at which the system became singular.
        order: usize,
        /// Offending reflection coefficient (`NaN` when `r[0] <= 0`).
        reflection: f64,
    },

    /// Returned when fewer autocovariances are supplied than the order needs.
    #[error("autocovariance sequence too short: need {need}, got {got}")]
    AutocovarianceTooShort {
        /// Number of autocovariances required (`order + 1`).
        need: usize,
        /// Number supplied.
        got: usize,
    },
}
