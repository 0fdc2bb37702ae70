//! Conversion of time spans to signed seconds.

use crate::error::ToolsError;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Seconds in one Julian year (365.25 days), the unit trend slopes are
/// reported in.
pub const SECONDS_PER_YEAR: f64 = 365.25 * SECONDS_PER_DAY;

/// A time span that can be expressed as a signed number of seconds.
pub trait AsSeconds {
    /// Returns the span in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ToolsError::InvalidDuration`] when the span has no finite
    /// representation in seconds.
    fn as_seconds(&self) -> Result<f64, ToolsError>;
}

impl AsSeconds for chrono::TimeDelta {
    fn as_seconds(&self) -> Result<f64, ToolsError> {
        Ok(self.num_seconds() as f64 + f64::from(self.subsec_nanos()) * 1e-9)
    }
}

impl AsSeconds for std::time::Duration {
    fn as_seconds(&self) -> Result<f64, ToolsError> {
        Ok(self.as_secs_f64())
    }
}

/// Raw seconds, accepted as long as they are finite.
impl AsSeconds for f64 {
    fn as_seconds(&self) -> Result<f64, ToolsError> {
        if self.is_finite() {
            Ok(*self)
        } else {
            Err(ToolsError::InvalidDuration {
                reason: format!("seconds must be finite, got {self}"),
            })
        }
    }
}

/// Converts any [`AsSeconds`] span to signed seconds.
///
/// # Errors
///
/// Returns [`ToolsError::InvalidDuration`] if the span is not a valid
/// finite duration.
pub fn to_seconds<D: AsSeconds + ?Sized>(span: &D) -> Result<f64, ToolsError> {
    span.as_seconds()
}
