//! # mk-kendall
//!
//! Statistics of the Mann-Kendall trend test: the S statistic, its variance
//! with data and time ties, the standardised Z, exact and normal p-values,
//! and Sen's slope with confidence limits.
//!
//! All functions are pure. Values are `Option<f64>` with `None` for missing
//! entries; times are offsets in seconds.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `statistic` | S statistic with time-tie groups |
//! | `variance` | Kendall variance (GAW eq. 4.20) and Z |
//! | `ess` | Effective-sample-size inflation of Var(S) |
//! | `table` | Exact small-sample probabilities |
//! | `significance` | p-values, trend classification, 3PW combination |
//! | `slope` | Pairwise slopes and Sen's slope confidence limits |
//! | `error` | Error types |

mod error;
mod ess;
mod significance;
mod slope;
mod statistic;
mod table;
mod variance;

pub use error::KendallError;
pub use ess::ess_factor;
pub use significance::{
    PBasis, PValue, ThreePwOutcome, ThreePwVerdict, Trend, classify, p_value, prob_3pw,
    significance_level, z_quantile,
};
pub use slope::{SenSlope, pairwise_slopes, slope_confidence};
pub use statistic::{SStatistic, s_statistic};
pub use table::{EXACT_MAX_N, prob_mk_n};
pub use variance::{kendall_var, std_normal_var};
