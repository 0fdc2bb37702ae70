//! Analysis segments: owned, chronologically ordered subsequences with
//! their time-delta vector.

use chrono::{NaiveDateTime, TimeDelta};
use mk_tools::to_seconds;

use crate::error::SeriesError;

/// One unit of Mann-Kendall analysis.
///
/// A segment owns copies of its timestamps and values. `deltas[i]` is the
/// number of seconds between points `i` and `i + 1` and `offsets[i]` the
/// number of seconds since the first point; both are non-negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    label: String,
    times: Vec<NaiveDateTime>,
    values: Vec<Option<f64>>,
    deltas: Vec<f64>,
    offsets: Vec<f64>,
}

impl Segment {
    /// Builds a segment from timestamps and values.
    ///
    /// Non-finite values are treated as missing.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::EmptySeries`] | no points |
    /// | [`SeriesError::LengthMismatch`] | `times.len() != values.len()` |
    /// | [`SeriesError::UnorderedTimes`] | a timestamp precedes its predecessor |
    pub fn new(
        times: Vec<NaiveDateTime>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, SeriesError> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        if times.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        if let Some(index) = times.windows(2).position(|w| w[1] < w[0]) {
            return Err(SeriesError::UnorderedTimes { index: index + 1 });
        }

        let t0 = times[0];
        let offsets = times
            .iter()
            .map(|&t| to_seconds(&(t - t0)))
            .collect::<Result<Vec<f64>, _>>()?;
        let deltas = times
            .windows(2)
            .map(|w| to_seconds(&(w[1] - w[0])))
            .collect::<Result<Vec<f64>, _>>()?;

        Ok(Self {
            label: String::new(),
            times,
            values: normalise(values),
            deltas,
            offsets,
        })
    }

    /// Builds a segment from a start time and explicit deltas in seconds.
    ///
    /// Offsets are the exact cumulative sums of `deltas`, so zero deltas
    /// produce time ties.
    ///
    /// # Errors
    ///
    /// | Variant | Trigger |
    /// |---------|---------|
    /// | [`SeriesError::EmptySeries`] | no values |
    /// | [`SeriesError::DeltaLengthMismatch`] | `deltas.len() != values.len() - 1` |
    /// | [`SeriesError::InvalidDelta`] | a delta is negative, non-finite or overflows the calendar |
    pub fn from_deltas(
        start: NaiveDateTime,
        deltas: &[f64],
        values: Vec<Option<f64>>,
    ) -> Result<Self, SeriesError> {
        if values.is_empty() {
            return Err(SeriesError::EmptySeries);
        }
        let expected = values.len() - 1;
        if deltas.len() != expected {
            return Err(SeriesError::DeltaLengthMismatch {
                deltas: deltas.len(),
                values: values.len(),
                expected,
            });
        }

        let mut offsets = Vec::with_capacity(values.len());
        let mut times = Vec::with_capacity(values.len());
        let mut acc = 0.0;
        offsets.push(acc);
        times.push(start);
        for (index, &delta) in deltas.iter().enumerate() {
            if !delta.is_finite() || delta < 0.0 {
                return Err(SeriesError::InvalidDelta { index, delta });
            }
            acc += delta;
            let time = seconds_to_delta(acc)
                .and_then(|d| start.checked_add_signed(d))
                .ok_or(SeriesError::InvalidDelta { index, delta })?;
            offsets.push(acc);
            times.push(time);
        }

        Ok(Self {
            label: String::new(),
            times,
            values: normalise(values),
            deltas: deltas.to_vec(),
            offsets,
        })
    }

    /// Sets the segment label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Returns a new segment with the same timestamps and `values`.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if `values` has a different
    /// length.
    pub fn with_values(&self, values: Vec<Option<f64>>) -> Result<Self, SeriesError> {
        if values.len() != self.values.len() {
            return Err(SeriesError::LengthMismatch {
                times: self.times.len(),
                values: values.len(),
            });
        }
        Ok(Self {
            label: self.label.clone(),
            times: self.times.clone(),
            values: normalise(values),
            deltas: self.deltas.clone(),
            offsets: self.offsets.clone(),
        })
    }

    /// Segment label (empty if unset).
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Timestamps.
    pub fn times(&self) -> &[NaiveDateTime] {
        &self.times
    }

    /// Values, `None` where missing.
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Seconds between consecutive points, length `len() - 1`.
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    /// Seconds since the first point.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Number of points, missing ones included.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always false for a constructed segment.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of present values.
    pub fn n_valid(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }
}

fn normalise(values: Vec<Option<f64>>) -> Vec<Option<f64>> {
    values
        .into_iter()
        .map(|v| v.filter(|x| x.is_finite()))
        .collect()
}

fn seconds_to_delta(seconds: f64) -> Option<TimeDelta> {
    let whole = seconds.trunc();
    if whole > i64::MAX as f64 {
        return None;
    }
    let nanos = (((seconds - whole) * 1e9).round() as u32).min(999_999_999);
    TimeDelta::new(whole as i64, nanos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn deltas_and_offsets() {
        let seg = Segment::new(
            vec![at(2000, 1, 1), at(2000, 1, 2), at(2000, 1, 4)],
            vec![Some(1.0), None, Some(3.0)],
        )
        .unwrap();
        assert_eq!(seg.deltas(), &[86_400.0, 172_800.0]);
        assert_eq!(seg.offsets(), &[0.0, 86_400.0, 259_200.0]);
        assert_eq!(seg.len(), 3);
        assert_eq!(seg.n_valid(), 2);
    }

    #[test]
    fn duplicate_times_allowed() {
        let seg = Segment::new(
            vec![at(2000, 1, 1), at(2000, 1, 1)],
            vec![Some(1.0), Some(2.0)],
        )
        .unwrap();
        assert_eq!(seg.deltas(), &[0.0]);
    }

    #[test]
    fn rejects_unordered() {
        let err = Segment::new(
            vec![at(2000, 1, 2), at(2000, 1, 1)],
            vec![Some(1.0), Some(2.0)],
        )
        .unwrap_err();
        assert_eq!(err, SeriesError::UnorderedTimes { index: 1 });
    }

    #[test]
    fn rejects_mismatch_and_empty() {
        assert_eq!(
            Segment::new(vec![at(2000, 1, 1)], vec![]).unwrap_err(),
            SeriesError::LengthMismatch { times: 1, values: 0 }
        );
        assert_eq!(
            Segment::new(vec![], vec![]).unwrap_err(),
            SeriesError::EmptySeries
        );
    }

    #[test]
    fn from_deltas_builds_times() {
        let seg = Segment::from_deltas(
            at(2000, 1, 1),
            &[3600.0, 0.0, 1.5],
            vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
        )
        .unwrap();
        assert_eq!(seg.offsets(), &[0.0, 3600.0, 3600.0, 3601.5]);
        assert_eq!(seg.times()[1], seg.times()[2]);
        let last = seg.times()[3] - seg.times()[0];
        assert_relative_eq!(to_seconds(&last).unwrap(), 3601.5, epsilon = 1e-9);
    }

    #[test]
    fn from_deltas_length_mismatch() {
        let err = Segment::from_deltas(at(2000, 1, 1), &[1.0, 1.0], vec![Some(1.0), Some(2.0)])
            .unwrap_err();
        assert_eq!(
            err,
            SeriesError::DeltaLengthMismatch {
                deltas: 2,
                values: 2,
                expected: 1
            }
        );
    }

    #[test]
    fn from_deltas_negative() {
        let err = Segment::from_deltas(
            at(2000, 1, 1),
            &[1.0, -2.0],
            vec![Some(1.0), Some(2.0), Some(3.0)],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SeriesError::InvalidDelta {
                index: 1,
                delta: -2.0
            }
        );
    }

    #[test]
    fn from_deltas_nan() {
        let err = Segment::from_deltas(at(2000, 1, 1), &[f64::NAN], vec![Some(1.0), Some(2.0)])
            .unwrap_err();
        assert!(matches!(err, SeriesError::InvalidDelta { index: 0, .. }));
    }

    #[test]
    fn with_values_is_independent() {
        let seg = Segment::new(vec![at(2000, 1, 1), at(2001, 1, 1)], vec![Some(1.0), Some(2.0)])
            .unwrap()
            .with_label("all");
        let other = seg.with_values(vec![None, Some(5.0)]).unwrap();
        assert_eq!(seg.values(), &[Some(1.0), Some(2.0)]);
        assert_eq!(other.values(), &[None, Some(5.0)]);
        assert_eq!(other.times(), seg.times());
        assert_eq!(other.label(), "all");
        assert!(seg.with_values(vec![None]).is_err());
    }
}
