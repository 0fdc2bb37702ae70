//! Error types for the mk-white crate.

use mk_kendall::KendallError;
use mk_series::SeriesError;

/// Error type for all fallible operations in the mk-white crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum WhiteError {
    /// Returned when a pre-whitening tag is not in the method table.
    #[error("unknown pre-whitening method: {tag:?} (expected one of none, pw, tfpw_y, tfpw_ws, vctfpw, 3pw)")]
    UnknownPwMethod {
        /// The unrecognised tag.
        tag: String,
    },

    /// Returned when configuration validation fails.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the validation failure.
        reason: String,
    },

    /// Propagated from segment construction.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Propagated from the statistics layer.
    #[error(transparent)]
    Kendall(#[from] KendallError),
}
