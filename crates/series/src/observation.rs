//! Timestamped observations with explicit missing values.

use chrono::NaiveDateTime;

use crate::error::SeriesError;
use crate::segment::Segment;

/// A single timestamped measurement.
///
/// `value` is `None` for a missing measurement. Non-finite inputs are
/// normalised to `None` by [`Observation::new`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Measurement time.
    pub time: NaiveDateTime,
    /// Measured value, `None` when missing.
    pub value: Option<f64>,
}

impl Observation {
    /// Creates an observation, mapping NaN and infinities to `None`.
    pub fn new(time: NaiveDateTime, value: Option<f64>) -> Self {
        Self {
            time,
            value: value.filter(|v| v.is_finite()),
        }
    }

    /// Whether the value is present.
    pub fn is_valid(&self) -> bool {
        self.value.is_some()
    }
}

/// Chronologically ordered observations, possibly several per timestamp.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ObservationSeries {
    observations: Vec<Observation>,
}

impl ObservationSeries {
    /// Builds a series, sorting by time.
    ///
    /// The sort is stable: observations sharing a timestamp keep their
    /// input order.
    pub fn new(observations: Vec<Observation>) -> Self {
        let mut observations: Vec<Observation> = observations
            .into_iter()
            .map(|o| Observation::new(o.time, o.value))
            .collect();
        observations.sort_by_key(|o| o.time);
        Self { observations }
    }

    /// Builds a series from parallel time and value vectors.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::LengthMismatch`] if the vectors differ in length.
    pub fn from_parts(
        times: Vec<NaiveDateTime>,
        values: Vec<Option<f64>>,
    ) -> Result<Self, SeriesError> {
        if times.len() != values.len() {
            return Err(SeriesError::LengthMismatch {
                times: times.len(),
                values: values.len(),
            });
        }
        Ok(Self::new(
            times
                .into_iter()
                .zip(values)
                .map(|(time, value)| Observation::new(time, value))
                .collect(),
        ))
    }

    /// All observations in chronological order.
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// Number of observations, missing ones included.
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no observations.
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Number of observations with a present value.
    pub fn n_valid(&self) -> usize {
        self.observations.iter().filter(|o| o.is_valid()).count()
    }

    /// Copies the whole series into a single analysis segment, duplicate
    /// timestamps kept as time ties.
    ///
    /// # Errors
    ///
    /// Returns [`SeriesError::EmptySeries`] for an empty series.
    pub fn to_segment(&self) -> Result<Segment, SeriesError> {
        let times = self.observations.iter().map(|o| o.time).collect();
        let values = self.observations.iter().map(|o| o.value).collect();
        Segment::new(times, values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn non_finite_becomes_missing() {
        assert_eq!(Observation::new(at(2000, 1, 1), Some(f64::NAN)).value, None);
        assert_eq!(
            Observation::new(at(2000, 1, 1), Some(f64::INFINITY)).value,
            None
        );
        assert_eq!(Observation::new(at(2000, 1, 1), Some(1.5)).value, Some(1.5));
    }

    #[test]
    fn sorted_and_stable() {
        let series = ObservationSeries::new(vec![
            Observation::new(at(2001, 1, 1), Some(3.0)),
            Observation::new(at(2000, 1, 1), Some(1.0)),
            Observation::new(at(2000, 1, 1), Some(2.0)),
        ]);
        let values: Vec<Option<f64>> = series.observations().iter().map(|o| o.value).collect();
        assert_eq!(values, vec![Some(1.0), Some(2.0), Some(3.0)]);
    }

    #[test]
    fn from_parts_mismatch() {
        let err = ObservationSeries::from_parts(vec![at(2000, 1, 1)], vec![]).unwrap_err();
        assert_eq!(err, SeriesError::LengthMismatch { times: 1, values: 0 });
    }

    #[test]
    fn counts_valid() {
        let series = ObservationSeries::from_parts(
            vec![at(2000, 1, 1), at(2001, 1, 1), at(2002, 1, 1)],
            vec![Some(1.0), None, Some(f64::NAN)],
        )
        .unwrap();
        assert_eq!(series.len(), 3);
        assert_eq!(series.n_valid(), 1);
    }

    #[test]
    fn empty_series_has_no_segment() {
        let series = ObservationSeries::default();
        assert!(series.is_empty());
        assert_eq!(series.to_segment().unwrap_err(), SeriesError::EmptySeries);
    }
}
