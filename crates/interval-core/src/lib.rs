//! Core data model for interval summarization
//!
//! This crate provides the shared vocabulary of the interval-viz workspace:
//!
//! - **Observations**: raw outcomes tagged with a condition and a facet
//! - **Group identity**: the `(condition, facet)` key estimates are matched by
//! - **Coverage**: standard-deviation multiples mapped through the normal CDF
//! - **Moments**: per-group mean and Bessel-corrected dispersion, with an
//!   explicit marker for groups too small to carry a dispersion estimate
//!
//! Higher-level crates build interval estimates (`interval-summary`) and
//! paired comparison figures (`interval-plot`) on top of these types.

mod coverage;
mod error;
mod moments;
mod observation;

// Re-exports
pub use coverage::CoverageSpec;
pub use error::{Error, Result};
pub use moments::{empirical_quantile, GroupMoments};
pub use observation::{group_observations, GroupKey, Observation, TrueEffect, SINGLE_FACET};
