//! Grouped interval summarization with paired CI/PI comparison figures
//!
//! This facade re-exports the workspace crates:
//!
//! - [`interval_core`]: observations, group identity, coverage, moments
//! - [`interval_summary`]: grouped confidence and prediction intervals
//! - [`interval_plot`]: the paired two-panel figure renderer
//! - [`interval_study`]: snapshot loading and inferential reporting
//!
//! # Example
//!
//! ```no_run
//! use interval_viz::{CoverageSpec, IntervalSummarizer, PairedIntervalRenderer, RenderSpec};
//! use interval_viz::interval_study::{
//!     load_snapshot, retain_passing, to_observations, SnapshotConfig,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let records = retain_passing(load_snapshot("snapshot.csv", &SnapshotConfig::default())?);
//! let observations = to_observations(&records);
//!
//! let summary = IntervalSummarizer::new(CoverageSpec::new(1.0)?).summarize(&observations)?;
//! let renderer = PairedIntervalRenderer::new(RenderSpec::default());
//! renderer.save(&summary, None, "intervals.svg", (1000, 760))?;
//! # Ok(())
//! # }
//! ```

pub use interval_core;
pub use interval_plot;
pub use interval_study;
pub use interval_summary;

pub use interval_core::{CoverageSpec, GroupKey, Observation, TrueEffect};
pub use interval_plot::{Orientation, PairedIntervalRenderer, PlotStyle, RenderSpec};
pub use interval_summary::{
    IntervalBounds, IntervalEstimate, IntervalKind, IntervalSummarizer, IntervalSummary, PiMode,
};
