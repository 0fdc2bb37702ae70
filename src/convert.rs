//! Pure conversion functions: TOML config structs -> crate API config types.

use anyhow::{Context, Result, bail};

use mk_series::{Grouping, Reduction};
use mk_trend::MkConfig;
use mk_white::PwMethod;

use crate::config::AnalysisToml;

/// Parses a grouping name string into the corresponding enum variant.
pub fn parse_grouping(s: &str) -> Result<Grouping> {
    match s.to_lowercase().as_str() {
        "none" => Ok(Grouping::None),
        "annual" => Ok(Grouping::Annual),
        "seasons" => Ok(Grouping::Seasons),
        "months" => Ok(Grouping::Months),
        other => bail!("unknown grouping: {other:?}"),
    }
}

/// Parses a duplicate-timestamp reduction name string into the corresponding
/// enum variant.
pub fn parse_reduction(s: &str) -> Result<Reduction> {
    match s.to_lowercase().as_str() {
        "mean" => Ok(Reduction::Mean),
        "median" => Ok(Reduction::Median),
        "keep" => Ok(Reduction::Keep),
        other => bail!("unknown reduction: {other:?}"),
    }
}

/// Parses a pre-whitening tag.
pub fn parse_pw_method(s: &str) -> Result<PwMethod> {
    Ok(s.parse::<PwMethod>()?)
}

/// Builds an [`MkConfig`] from the TOML analysis configuration.
pub fn build_mk_config(analysis: &AnalysisToml) -> Result<MkConfig> {
    let cfg = MkConfig::new()
        .with_pw_method(parse_pw_method(&analysis.pw_method)?)
        .with_alpha_mk(analysis.alpha_mk)
        .with_alpha_ak(analysis.alpha_ak)
        .with_alpha_cl(analysis.alpha_cl)
        .with_alpha_xhomo(analysis.alpha_xhomo)
        .with_resolution(analysis.resolution)
        .with_min_points(analysis.min_points)
        .with_ess_correction(analysis.ess_correction);
    cfg.validate().context("invalid [analysis] settings")?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groupings() {
        assert_eq!(parse_grouping("Seasons").unwrap(), Grouping::Seasons);
        assert_eq!(parse_grouping("months").unwrap(), Grouping::Months);
        let err = parse_grouping("weekly").unwrap_err();
        assert_eq!(err.to_string(), "unknown grouping: \"weekly\"");
    }

    #[test]
    fn reductions() {
        assert!(matches!(parse_reduction("median").unwrap(), Reduction::Median));
        assert!(matches!(parse_reduction("KEEP").unwrap(), Reduction::Keep));
        assert!(parse_reduction("sum").is_err());
    }

    #[test]
    fn pw_methods() {
        assert_eq!(parse_pw_method("3pw").unwrap(), PwMethod::ThreePw);
        assert_eq!(parse_pw_method("tfpw_ws").unwrap(), PwMethod::TfpwWs);
        assert!(parse_pw_method("tfpw").is_err());
    }

    #[test]
    fn default_analysis_builds() {
        let cfg = build_mk_config(&AnalysisToml::default()).unwrap();
        assert_eq!(cfg.pw_method(), PwMethod::ThreePw);
        assert_eq!(cfg.min_points(), 4);
    }

    #[test]
    fn invalid_alpha_is_reported() {
        let analysis = AnalysisToml {
            alpha_mk: 1.5,
            ..AnalysisToml::default()
        };
        let err = build_mk_config(&analysis).unwrap_err();
        assert!(format!("{err:#}").contains("alpha_mk must be in (0, 1)"));
    }
}
