//! Analyse command: trend test of a JSON observation file.

use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::{info, info_span, warn};

use mk_series::{ObservationSeries, mk_temp_aggr};
use mk_trend::{MultiResult, compute_mk_multi, to_json};

use crate::cli::AnalyseArgs;
use crate::config::MkToml;
use crate::convert;
use crate::input;

/// A group left out of the analysis.
#[derive(Debug, Serialize)]
struct Skipped {
    label: String,
    n_valid: usize,
}

/// Written output: the per-segment and pooled results.
#[derive(Debug, Serialize)]
struct Report {
    grouping: String,
    skipped: Vec<Skipped>,
    #[serde(flatten)]
    results: MultiResult,
}

/// Run the analysis pipeline.
pub fn run(args: AnalyseArgs) -> Result<()> {
    let _cmd = info_span!("analyse").entered();
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: MkToml = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    info!(path = %args.input.display(), "reading observations");
    let series = input::read_observations(&args.input)?;
    info!(n = series.len(), n_valid = series.n_valid(), "observations loaded");

    let json = analyse(&config, &series)?;
    match args.output {
        Some(path) => {
            std::fs::write(&path, &json)
                .with_context(|| format!("failed to write results: {}", path.display()))?;
            info!(path = %path.display(), "results written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

/// Aggregates, tests and serialises `series` under `config`.
fn analyse(config: &MkToml, series: &ObservationSeries) -> Result<String> {
    let analysis = &config.analysis;
    let mk_config = convert::build_mk_config(analysis)?;
    let grouping = convert::parse_grouping(&analysis.grouping)?;
    let reduction = convert::parse_reduction(&analysis.reduction)?;

    let aggregation = mk_temp_aggr(series, grouping, reduction, mk_config.min_points())
        .context("failed to aggregate observations")?;
    for group in &aggregation.skipped {
        warn!(label = %group.label, n_valid = group.n_valid, "group skipped");
    }
    if aggregation.segments.is_empty() {
        bail!(
            "no group has at least {} valid values",
            mk_config.min_points()
        );
    }

    info!(
        segments = aggregation.segments.len(),
        pw_method = %mk_config.pw_method(),
        "running Mann-Kendall test"
    );
    let results = compute_mk_multi(&aggregation.segments, &mk_config)?;
    info!(
        trend = ?results.pooled.trend,
        slope = results.pooled.slope,
        p = results.pooled.p,
        "pooled result"
    );

    let report = Report {
        grouping: analysis.grouping.to_lowercase(),
        skipped: aggregation
            .skipped
            .into_iter()
            .map(|g| Skipped {
                label: g.label,
                n_valid: g.n_valid,
            })
            .collect(),
        results,
    };
    Ok(to_json(&report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn monthly_json(years: i32) -> String {
        let mut obs = Vec::new();
        for y in 0..years {
            for m in 1..=12 {
                let value = 0.5 * f64::from(y) + f64::from(m) / 10.0;
                obs.push(format!(
                    r#"{{"time": "{}-{m:02}-15T00:00:00", "value": {value}}}"#,
                    2000 + y
                ));
            }
        }
        format!(r#"{{"observations": [{}]}}"#, obs.join(","))
    }

    fn config(toml_str: &str) -> MkToml {
        toml::from_str(toml_str).unwrap()
    }

    #[test]
    fn months_grouping_reports_every_month() {
        let series = input::parse_observations(&monthly_json(8)).unwrap();
        let cfg = config("[analysis]\ngrouping = \"months\"\npw_method = \"none\"\n");
        let json = analyse(&cfg, &series).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["segments"].as_array().unwrap().len(), 12);
        assert_eq!(value["pooled"]["trend"], "increasing");
        assert_eq!(value["pooled"]["s"], 12 * 28);
        assert_eq!(value["grouping"], "months");
    }

    #[test]
    fn too_short_everywhere_is_an_error() {
        let series = input::parse_observations(&monthly_json(1)).unwrap();
        let cfg = config("[analysis]\ngrouping = \"months\"\n");
        let err = analyse(&cfg, &series).unwrap_err();
        assert_eq!(err.to_string(), "no group has at least 4 valid values");
    }

    #[test]
    fn unknown_grouping_is_an_error() {
        let series = input::parse_observations(&monthly_json(2)).unwrap();
        let cfg = config("[analysis]\ngrouping = \"weekly\"\n");
        assert!(analyse(&cfg, &series).is_err());
    }

    #[test]
    fn run_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("mk.toml");
        let input_path = dir.path().join("obs.json");
        let output_path = dir.path().join("out.json");
        std::fs::write(&config_path, "[analysis]\npw_method = \"tfpw_y\"\n").unwrap();
        std::fs::write(&input_path, monthly_json(5)).unwrap();

        run(AnalyseArgs {
            config: config_path,
            input: input_path,
            output: Some(output_path.clone()),
        })
        .unwrap();

        let written = std::fs::read_to_string(&output_path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["segments"][0]["label"], "all");
        assert_eq!(value["segments"][0]["n"], 60);
        assert_eq!(value["pooled"]["pw_requested"], "tfpw_y");
    }

    #[test]
    fn missing_config_is_an_error() {
        let err = run(AnalyseArgs {
            config: PathBuf::from("/nonexistent/mk.toml"),
            input: PathBuf::from("/nonexistent/obs.json"),
            output: None,
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("failed to read config file"));
    }
}
