use serde::Deserialize;

/// Top-level configuration file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct MkToml {
    /// Analysis settings.
    #[serde(default)]
    pub analysis: AnalysisToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnalysisToml {
    #[serde(default = "default_pw_method")]
    pub pw_method: String,
    #[serde(default = "default_alpha_mk")]
    pub alpha_mk: f64,
    #[serde(default = "default_alpha_ak")]
    pub alpha_ak: f64,
    #[serde(default = "default_alpha_cl")]
    pub alpha_cl: f64,
    #[serde(default = "default_alpha_xhomo")]
    pub alpha_xhomo: f64,
    #[serde(default)]
    pub resolution: f64,
    #[serde(default = "default_min_points")]
    pub min_points: usize,
    #[serde(default)]
    pub ess_correction: bool,
    #[serde(default = "default_grouping")]
    pub grouping: String,
    #[serde(default = "default_reduction")]
    pub reduction: String,
}

impl Default for AnalysisToml {
    fn default() -> Self {
        Self {
            pw_method: default_pw_method(),
            alpha_mk: default_alpha_mk(),
            alpha_ak: default_alpha_ak(),
            alpha_cl: default_alpha_cl(),
            alpha_xhomo: default_alpha_xhomo(),
            resolution: 0.0,
            min_points: default_min_points(),
            ess_correction: false,
            grouping: default_grouping(),
            reduction: default_reduction(),
        }
    }
}

fn default_pw_method() -> String {
    "3pw".to_string()
}
fn default_alpha_mk() -> f64 {
    0.05
}
fn default_alpha_ak() -> f64 {
    0.05
}
fn default_alpha_cl() -> f64 {
    0.10
}
fn default_alpha_xhomo() -> f64 {
    0.10
}
fn default_min_points() -> usize {
    4
}
fn default_grouping() -> String {
    "none".to_string()
}
fn default_reduction() -> String {
    "mean".to_string()
}
