//! Pre-whitening method tags.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::WhiteError;

/// Serial-correlation correction applied before the Mann-Kendall test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PwMethod {
    /// No correction.
    None,
    /// AR(1) removal on the raw series (von Storch 1995).
    Pw,
    /// Trend-free pre-whitening (Yue et al. 2002).
    TfpwY,
    /// Iterative trend-free pre-whitening (Wang & Swail 2001).
    TfpwWs,
    /// Variance-corrected TFPW (Wang et al. 2015).
    Vctfpw,
    /// Significance from PW and TFPW-Y, slope from VCTFPW.
    #[default]
    #[serde(rename = "3pw")]
    ThreePw,
}

/// Recognised tags.
pub static PW_METHODS: [(&str, PwMethod); 6] = [
    ("none", PwMethod::None),
    ("pw", PwMethod::Pw),
    ("tfpw_y", PwMethod::TfpwY),
    ("tfpw_ws", PwMethod::TfpwWs),
    ("vctfpw", PwMethod::Vctfpw),
    ("3pw", PwMethod::ThreePw),
];

impl PwMethod {
    /// Tag of this method.
    pub fn tag(self) -> &'static str {
        PW_METHODS
            .iter()
            .find(|(_, m)| *m == self)
            .map(|(tag, _)| *tag)
            .expect("every method has a tag")
    }
}

impl fmt::Display for PwMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for PwMethod {
    type Err = WhiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PW_METHODS
            .iter()
            .find(|(tag, _)| tag.eq_ignore_ascii_case(s.trim()))
            .map(|(_, m)| *m)
            .ok_or_else(|| WhiteError::UnknownPwMethod { tag: s.to_string() })
    }
}
