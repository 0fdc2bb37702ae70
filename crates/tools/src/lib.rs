//! # mk-tools
//!
//! Low-level numeric helpers shared by the Mann-Kendall crates.
//!
//! Missing observations are carried as `Option<f64>` throughout; every
//! helper here either skips `None` entries explicitly or counts them.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `summary` | mean, variance, median, missing-aware variants |
//! | `ties` | tie-group counting (exact runs or resolution bins) |
//! | `sort` | missing-aware stable sort |
//! | `duration` | duration to signed seconds |
//! | `autocorr` | missing-aware sample autocorrelation |
//! | `levinson` | Levinson-Durbin recursion |
//! | `error` | Error types |

mod autocorr;
mod duration;
mod error;
mod levinson;
mod sort;
mod summary;
mod ties;

pub use autocorr::{nan_acf, nan_autocorr};
pub use duration::{AsSeconds, SECONDS_PER_DAY, SECONDS_PER_YEAR, to_seconds};
pub use error::ToolsError;
pub use levinson::{Levinson, levinson};
pub use sort::{NanSorted, nan_sort};
pub use summary::{mean, median, nan_mean, nan_median, nan_variance, variance};
pub use ties::{nb_tie, tie_counts};
