//! # mk-trend
//!
//! Mann-Kendall trend test with Sen's slope for environmental time series.
//!
//! A [`Segment`](mk_series::Segment) is pre-whitened with the configured
//! [`PwMethod`](mk_white::PwMethod), then S, Var(S), Z, the p-value, the
//! trend direction and Sen's slope with confidence limits are assembled
//! into an [`MkResult`]. Several segments (months, seasons) can be pooled
//! into a seasonal Kendall test with [`compute_mk_multi`].
//!
//! Short segments never fail: they yield a result with
//! [`Trend::InsufficientData`](mk_kendall::Trend::InsufficientData).
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `config` | `MkConfig` builder with validation |
//! | `engine` | Statistics of one value series |
//! | `stat` | Single-segment test, `s_test`, `sen_slope` |
//! | `multi` | Seasonal pooling and homogeneity test |
//! | `result` | `MkResult`, `MultiResult` and JSON output |
//! | `error` | Error types |

mod config;
mod engine;
mod error;
mod multi;
mod result;
mod stat;

pub use config::MkConfig;
pub use error::TrendError;
pub use multi::{POOLED_LABEL, compute_mk_multi};
pub use result::{MkResult, MultiResult, to_json};
pub use stat::{compute_mk_stat, s_test, sen_slope};
