//! Paired visualization of confidence and prediction intervals
//!
//! This crate renders an [`interval_summary::IntervalSummary`] as a
//! single figure with two stacked panels: confidence intervals on the
//! mean above, prediction intervals for individual observations below.
//! Both panels share the same category slots and value range so that
//! the widths of the two interval kinds can be compared directly.
//!
//! Rendering is split in two layers. A backend-free layout step turns
//! the summary into positioned marks, and a thin plotters layer draws
//! those marks onto any [`plotters::prelude::DrawingBackend`]. The
//! [`PairedIntervalRenderer::save`] convenience picks an SVG or bitmap
//! backend from the file extension and guarantees that a failed export
//! leaves no file behind.
//!
//! # Example
//!
//! ```no_run
//! use interval_core::{CoverageSpec, Observation};
//! use interval_plot::{PairedIntervalRenderer, RenderSpec};
//! use interval_summary::IntervalSummarizer;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let observations = vec![
//!     Observation::unfaceted(11.0, "treatment"),
//!     Observation::unfaceted(14.0, "treatment"),
//!     Observation::unfaceted(9.0, "control"),
//!     Observation::unfaceted(10.0, "control"),
//! ];
//! let summary = IntervalSummarizer::new(CoverageSpec::new(1.0)?).summarize(&observations)?;
//!
//! let renderer = PairedIntervalRenderer::new(RenderSpec::default());
//! renderer.save(&summary, None, "intervals.svg", (900, 700))?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod layout;
mod render;

pub use config::{Orientation, PlotStyle, RenderSpec};
pub use error::{Error, Result};
pub use render::PairedIntervalRenderer;
