use chrono::{NaiveDate, NaiveDateTime};
use mk_series::{Grouping, Observation, ObservationSeries, Reduction, mk_temp_aggr};

fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

/// Ten years of monthly values with two readings on the 1st of every month.
fn monthly_series() -> ObservationSeries {
    let mut obs = Vec::new();
    for year in 2000..2010 {
        for month in 1..=12 {
            let base = f64::from(year - 2000) + f64::from(month) / 100.0;
            obs.push(Observation::new(at(year, month, 1), Some(base)));
            obs.push(Observation::new(at(year, month, 1), Some(base + 1.0)));
        }
    }
    ObservationSeries::new(obs)
}

#[test]
fn seasons_produce_four_segments() {
    let agg = mk_temp_aggr(&monthly_series(), Grouping::Seasons, Reduction::Mean, 4).unwrap();
    assert!(agg.skipped.is_empty());
    let labels: Vec<&str> = agg.segments.iter().map(|s| s.label()).collect();
    assert_eq!(labels, vec!["DJF", "MAM", "JJA", "SON"]);
    for seg in &agg.segments {
        assert_eq!(seg.len(), 30);
        assert_eq!(seg.deltas().len(), 29);
        assert!(seg.deltas().iter().all(|&d| d > 0.0));
    }
}

#[test]
fn months_reduce_duplicates() {
    let agg = mk_temp_aggr(&monthly_series(), Grouping::Months, Reduction::Mean, 4).unwrap();
    assert_eq!(agg.segments.len(), 12);
    let jan = &agg.segments[0];
    assert_eq!(jan.label(), "Jan");
    assert_eq!(jan.len(), 10);
    let first = jan.values()[0].unwrap();
    assert!((first - 0.51).abs() < 1e-12, "first = {first}");
}

#[test]
fn keep_retains_every_reading() {
    let agg = mk_temp_aggr(&monthly_series(), Grouping::None, Reduction::Keep, 4).unwrap();
    assert_eq!(agg.segments[0].len(), 240);
    let ties = agg.segments[0]
        .deltas()
        .iter()
        .filter(|&&d| d == 0.0)
        .count();
    assert_eq!(ties, 120);
}

#[test]
fn annual_reduction_one_point_per_year() {
    let agg = mk_temp_aggr(&monthly_series(), Grouping::Annual, Reduction::Median, 4).unwrap();
    let seg = &agg.segments[0];
    assert_eq!(seg.len(), 10);
    assert_eq!(seg.label(), "annual");
    assert_eq!(seg.times()[0].date(), NaiveDate::from_ymd_opt(2000, 1, 1).unwrap());
}

#[test]
fn sparse_groups_are_reported() {
    let obs = vec![
        Observation::new(at(2000, 1, 1), Some(1.0)),
        Observation::new(at(2001, 1, 1), Some(2.0)),
        Observation::new(at(2002, 1, 1), None),
    ];
    let agg = mk_temp_aggr(&ObservationSeries::new(obs), Grouping::None, Reduction::Mean, 4)
        .unwrap();
    assert!(agg.segments.is_empty());
    assert_eq!(agg.skipped.len(), 1);
    assert_eq!(agg.skipped[0].n_valid, 2);
}
