//! Error types for the mk-trend crate.

use mk_kendall::KendallError;
use mk_series::SeriesError;
use mk_white::WhiteError;

/// Error type for all fallible operations in the mk-trend crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum TrendError {
    /// Returned when configuration validation fails.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable description of the validation failure.
        reason: String,
    },

    /// Returned when a result cannot be written as JSON.
    #[error("serialization failed: {reason}")]
    Serialization {
        /// Message of the underlying serializer.
        reason: String,
    },

    /// Propagated from segment handling.
    #[error(transparent)]
    Series(#[from] SeriesError),

    /// Propagated from the statistics layer.
    #[error(transparent)]
    Kendall(#[from] KendallError),

    /// Propagated from pre-whitening.
    #[error(transparent)]
    White(#[from] WhiteError),
}
