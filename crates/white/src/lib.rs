//! # mk-white
//!
//! Serial-correlation correction ahead of the Mann-Kendall test.
//!
//! A positive lag-1 autocorrelation inflates the variance of S and makes
//! trends look more significant than they are. The methods here remove the
//! AR(1) component in different ways:
//!
//! | Method | Series |
//! |--------|--------|
//! | `pw` | `x[t] - ak x[t-1]` on the raw series |
//! | `tfpw_y` | same on the Sen-detrended series, trend re-added |
//! | `tfpw_ws` | `(x[t] - ak x[t-1]) / (1 - ak)`, slope and ak iterated |
//! | `vctfpw` | `tfpw_y` rescaled to the original variance, slope deflated |
//! | `3pw` | significance from `pw` and `tfpw_y`, slope from `vctfpw` |
//!
//! When an autocorrelation is not significant the correction is skipped and
//! the applied method is recorded as `none` (or `tfpw_y` for a `tfpw_ws`
//! fallback).
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `method` | `PwMethod` and its tag table |
//! | `config` | `WhiteConfig` builder |
//! | `ar` | Lag-1 AR estimation with significance test |
//! | `prewhite` | All pre-whitened series at once |
//! | `dispatch` | Single-method entry point |
//! | `error` | Error types |

mod ar;
mod config;
mod dispatch;
mod error;
mod method;
mod prewhite;

pub use ar::{ArEstimate, nanprewhite_ar};
pub use config::WhiteConfig;
pub use dispatch::prewhiten;
pub use error::WhiteError;
pub use method::{PW_METHODS, PwMethod};
pub use prewhite::{Prewhitened, Whitened, prewhite};
