//! Temporal aggregation of observation series into analysis segments.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use mk_tools::{mean, median};
use tracing::debug;

use crate::error::SeriesError;
use crate::observation::{Observation, ObservationSeries};
use crate::season::{Season, month_label};
use crate::segment::Segment;

/// How observations are split into analysis segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Grouping {
    /// The whole series is one segment.
    #[default]
    None,
    /// One point per calendar year, stamped January 1st.
    Annual,
    /// One segment per meteorological season (DJF, MAM, JJA, SON).
    Seasons,
    /// One segment per calendar month.
    Months,
}

/// Reduction applied to observations sharing a timestamp.
#[derive(Debug, Clone, Copy, Default)]
pub enum Reduction {
    /// Arithmetic mean of the present values.
    #[default]
    Mean,
    /// Median of the present values.
    Median,
    /// No reduction; duplicates stay as time ties.
    Keep,
    /// Caller-supplied reduction over the present values.
    Custom(fn(&[f64]) -> f64),
}

impl Reduction {
    fn reduce(self, values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let out = match self {
            Reduction::Mean | Reduction::Keep => mean(values),
            Reduction::Median => {
                let mut sorted = values.to_vec();
                sorted.sort_by(f64::total_cmp);
                median(&sorted)
            }
            Reduction::Custom(f) => f(values),
        };
        Some(out).filter(|v| v.is_finite())
    }
}

/// A group dropped for having too few valid values.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedGroup {
    /// Group label.
    pub label: String,
    /// Number of valid values after reduction.
    pub n_valid: usize,
}

/// Result of [`mk_temp_aggr`].
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Segments ready for analysis, in calendar order.
    pub segments: Vec<Segment>,
    /// Groups reported but not analysed.
    pub skipped: Vec<SkippedGroup>,
}

/// Splits `series` into analysis segments.
///
/// Observations sharing a timestamp are collapsed with `reduction` unless it
/// is [`Reduction::Keep`]. With [`Grouping::Annual`] every observation is
/// first re-stamped to January 1st of its year, so the reduction acts per
/// year. Groups with fewer than `min_points` valid values end up in
/// [`Aggregation::skipped`].
///
/// # Errors
///
/// Returns [`SeriesError::EmptySeries`] if `series` has no observations.
#[tracing::instrument(skip(series, reduction), fields(n = series.len()))]
pub fn mk_temp_aggr(
    series: &ObservationSeries,
    grouping: Grouping,
    reduction: Reduction,
    min_points: usize,
) -> Result<Aggregation, SeriesError> {
    if series.is_empty() {
        return Err(SeriesError::EmptySeries);
    }
    let obs = series.observations();

    let groups: Vec<(String, Vec<Observation>)> = match grouping {
        Grouping::None => vec![("all".to_string(), obs.to_vec())],
        Grouping::Annual => {
            let stamped = obs
                .iter()
                .map(|o| Observation::new(year_start(o.time), o.value))
                .collect();
            vec![("annual".to_string(), stamped)]
        }
        Grouping::Seasons => {
            let mut out = Vec::with_capacity(Season::ALL.len());
            for season in Season::ALL {
                let members = obs
                    .iter()
                    .filter(|o| Season::from_month(o.time.month()).is_ok_and(|s| s == season))
                    .copied()
                    .collect();
                out.push((season.label().to_string(), members));
            }
            out
        }
        Grouping::Months => (1..=12u32)
            .map(|m| {
                let members = obs.iter().filter(|o| o.time.month() == m).copied().collect();
                Ok((month_label(m)?.to_string(), members))
            })
            .collect::<Result<Vec<_>, SeriesError>>()?,
    };

    let mut segments = Vec::new();
    let mut skipped = Vec::new();
    for (label, members) in groups {
        let reduced = reduce_duplicates(&members, reduction);
        let n_valid = reduced.iter().filter(|o| o.is_valid()).count();
        if n_valid < min_points {
            debug!(group = %label, n_valid, min_points, "skipping group with too few values");
            skipped.push(SkippedGroup { label, n_valid });
            continue;
        }
        let times = reduced.iter().map(|o| o.time).collect();
        let values = reduced.iter().map(|o| o.value).collect();
        segments.push(Segment::new(times, values)?.with_label(label));
    }

    debug!(
        n_segments = segments.len(),
        n_skipped = skipped.len(),
        "aggregation complete"
    );
    Ok(Aggregation { segments, skipped })
}

/// Collapses runs of equal timestamps in chronologically sorted `obs`.
fn reduce_duplicates(obs: &[Observation], reduction: Reduction) -> Vec<Observation> {
    if matches!(reduction, Reduction::Keep) {
        return obs.to_vec();
    }
    obs.chunk_by(|a, b| a.time == b.time)
        .map(|run| {
            let present: Vec<f64> = run.iter().filter_map(|o| o.value).collect();
            Observation::new(run[0].time, reduction.reduce(&present))
        })
        .collect()
}

fn year_start(time: NaiveDateTime) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(time.year(), 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .expect("January 1st exists in every representable year")
}
