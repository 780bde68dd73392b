//! Confidence and prediction interval summarization
//!
//! This crate turns grouped raw outcomes into two parallel interval
//! collections at one nominal coverage:
//!
//! - **CI**: normal-approximation confidence interval on each group mean
//! - **PI**: prediction interval for individual outcomes, either
//!   mean +/- k standard deviations or the group's own empirical quantiles
//!
//! # Examples
//!
//! ```rust
//! use interval_core::{CoverageSpec, Observation};
//! use interval_summary::{IntervalKind, IntervalSummarizer, PiMode};
//!
//! let observations = vec![
//!     Observation::unfaceted(10.0, "treatment"),
//!     Observation::unfaceted(12.0, "treatment"),
//!     Observation::unfaceted(14.0, "treatment"),
//!     Observation::unfaceted(9.0, "control"),
//!     Observation::unfaceted(11.0, "control"),
//!     Observation::unfaceted(10.0, "control"),
//! ];
//!
//! let summarizer = IntervalSummarizer::new(CoverageSpec::ONE_SD)
//!     .with_pi_mode(PiMode::Quantile);
//! let summary = summarizer.summarize(&observations).unwrap();
//!
//! assert_eq!(summary.group_count(), 2);
//! for estimate in summary.of_kind(IntervalKind::Ci) {
//!     println!("{estimate}");
//! }
//! ```

mod estimate;
mod summarizer;

// Re-exports
pub use estimate::{IntervalBounds, IntervalEstimate, IntervalKind, IntervalSummary};
pub use summarizer::{IntervalSummarizer, PiMode};
