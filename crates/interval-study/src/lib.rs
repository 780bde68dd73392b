//! Study collaborators around the interval pipeline
//!
//! Everything the analysis scripts of an interval-perception study do
//! besides the summarization and rendering core: loading CSV snapshots,
//! excluding participants who failed the comprehension check, bridging
//! rows into observations, and one-shot inferential reports (Welch's t,
//! one-way ANOVA, uncorrected pairwise comparisons, Cohen's d).
//!
//! # Example
//!
//! ```
//! use interval_study::{
//!     condition_groups, read_snapshot, retain_passing, to_observations, welch_t_test,
//!     SnapshotConfig,
//! };
//!
//! # fn main() -> interval_study::Result<()> {
//! let csv = "\
//! participant_id,condition,response,passed_comprehension
//! p1,ci,31.0,true
//! p1,ci,28.5,true
//! p2,pi,24.0,true
//! p2,pi,22.5,true
//! p3,pi,19.0,false
//! ";
//! let records = retain_passing(read_snapshot(csv.as_bytes(), &SnapshotConfig::default())?);
//! let observations = to_observations(&records);
//! let groups = condition_groups(&observations);
//! let report = welch_t_test(&groups[0].1, &groups[1].1)?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

mod error;
mod inference;
mod snapshot;

pub use error::{Error, Result};
pub use inference::{
    cohen_d, condition_groups, one_way_anova, pairwise_welch, welch_t_test, CohensD,
    EffectMagnitude, OneWayAnova, PairwiseComparison, WelchTTest,
};
pub use snapshot::{
    load_snapshot, read_snapshot, retain_passing, to_observations, SnapshotConfig, StudyRecord,
};
