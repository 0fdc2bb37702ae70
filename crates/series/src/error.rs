//! Error types for the mk-series crate.

use mk_tools::ToolsError;

/// Error type for all fallible operations in the mk-series crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SeriesError {
    /// Returned when a series or segment has no observations.
    #[error("series is empty")]
    EmptySeries,

    /// Returned when the time and value vectors differ in length.
    #[error("length mismatch: {times} timestamps, {values} values")]
    LengthMismatch {
        /// Number of timestamps.
        times: usize,
        /// Number of values.
        values: usize,
    },

    /// Returned when a time-delta vector does not have one entry fewer
    /// than the values.
    #[error("time-delta length mismatch: {deltas} deltas for {values} values (expected {expected})")]
    DeltaLengthMismatch {
        /// Number of deltas supplied.
        deltas: usize,
        /// Number of values supplied.
        values: usize,
        /// Required number of deltas.
        expected: usize,
    },

    /// Returned when a time delta is negative or not finite.
    #[error("invalid time delta at index {index}: {delta}")]
    InvalidDelta {
        /// Position in the delta vector.
        index: usize,
        /// The offending delta in seconds.
        delta: f64,
    },

    /// Returned when timestamps go backwards.
    #[error("timestamps not in chronological order at index {index}")]
    UnorderedTimes {
        /// Index of the first timestamp earlier than its predecessor.
        index: usize,
    },

    /// Returned when a month number is outside 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u32,
    },

    /// Propagated from the duration helpers.
    #[error(transparent)]
    Tools(#[from] ToolsError),
}
