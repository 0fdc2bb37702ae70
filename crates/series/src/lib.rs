//! # mk-series
//!
//! Observation series and the analysis segments derived from them.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     A["Vec of Observation"] -->|"ObservationSeries::new()"| B["ObservationSeries"]
//!     B -->|"mk_temp_aggr(grouping, reduction)"| C["Aggregation"]
//!     C -->|".segments"| D["Segment (times, values, deltas)"]
//!     C -->|".skipped"| E["SkippedGroup"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use mk_series::{Grouping, ObservationSeries, Reduction, mk_temp_aggr};
//!
//! let series = ObservationSeries::from_parts(times, values)?;
//! let agg = mk_temp_aggr(&series, Grouping::Seasons, Reduction::Mean, 4)?;
//! for seg in &agg.segments {
//!     println!("{}: {} points", seg.label(), seg.n_valid());
//! }
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `observation` | Timestamped observations and chronologically sorted series |
//! | `segment` | Owned analysis segments with time-delta vectors |
//! | `season` | Meteorological seasons and month labels |
//! | `aggregate` | Grouping and duplicate-timestamp reduction |
//! | `error` | Error types |

mod aggregate;
mod error;
mod observation;
mod season;
mod segment;

pub use aggregate::{Aggregation, Grouping, Reduction, SkippedGroup, mk_temp_aggr};
pub use error::SeriesError;
pub use observation::{Observation, ObservationSeries};
pub use season::{Season, month_label};
pub use segment::Segment;
