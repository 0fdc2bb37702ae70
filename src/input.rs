//! JSON observation input.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDateTime;
use serde::Deserialize;

use mk_series::{Observation, ObservationSeries};

/// Input file layout: `{"observations": [{"time": ..., "value": ...}]}`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputFile {
    observations: Vec<InputObservation>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputObservation {
    /// ISO 8601 without offset, e.g. `2001-03-15T12:00:00`.
    time: NaiveDateTime,
    /// `null` for a missing value.
    value: Option<f64>,
}

/// Parses observations from a JSON string.
pub fn parse_observations(json: &str) -> Result<ObservationSeries> {
    let file: InputFile = serde_json::from_str(json).context("failed to parse observations JSON")?;
    if file.observations.is_empty() {
        bail!("input contains no observations");
    }
    let obs = file
        .observations
        .into_iter()
        .map(|o| Observation::new(o.time, o.value))
        .collect();
    Ok(ObservationSeries::new(obs))
}

/// Reads observations from a JSON file.
pub fn read_observations(path: &Path) -> Result<ObservationSeries> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input file: {}", path.display()))?;
    parse_observations(&json).with_context(|| format!("invalid input file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_values_and_gaps() {
        let series = parse_observations(
            r#"{"observations": [
                {"time": "2001-02-01T00:00:00", "value": 2.5},
                {"time": "2001-01-01T00:00:00", "value": null}
            ]}"#,
        )
        .unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.n_valid(), 1);
        // sorted chronologically
        assert_eq!(series.observations()[0].value, None);
    }

    #[test]
    fn empty_input_is_an_error() {
        let err = parse_observations(r#"{"observations": []}"#).unwrap_err();
        assert_eq!(err.to_string(), "input contains no observations");
    }

    #[test]
    fn malformed_time_is_an_error() {
        let res = parse_observations(r#"{"observations": [{"time": "yesterday", "value": 1.0}]}"#);
        assert!(res.is_err());
    }

    #[test]
    fn reads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("obs.json");
        std::fs::write(
            &path,
            r#"{"observations": [{"time": "2001-01-01T00:00:00", "value": 1.0}]}"#,
        )
        .unwrap();
        assert_eq!(read_observations(&path).unwrap().len(), 1);
        assert!(read_observations(&dir.path().join("missing.json")).is_err());
    }
}
