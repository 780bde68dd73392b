//! Grouped CI and PI summarization

use crate::{IntervalBounds, IntervalEstimate, IntervalKind, IntervalSummary};
use interval_core::{
    empirical_quantile, group_observations, CoverageSpec, Error, GroupMoments, Observation, Result,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// How prediction-interval bounds are derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PiMode {
    /// Mean plus/minus k standard deviations
    Moment,
    /// Empirical sample quantiles of the group itself
    Quantile,
}

impl PiMode {
    /// Short lowercase name for logs
    pub fn name(&self) -> &'static str {
        match self {
            Self::Moment => "moment",
            Self::Quantile => "quantile",
        }
    }
}

impl Default for PiMode {
    fn default() -> Self {
        Self::Moment
    }
}

/// Computes confidence and prediction intervals per (condition, facet) group
///
/// A single pass over the observations produces two parallel collections at
/// the same nominal coverage: a normal-approximation CI on each group mean,
/// and a prediction interval for individual outcomes in the configured
/// [`PiMode`]. In quantile mode the PI is the plug-in sample quantile of the
/// group itself, taken at the tail probabilities implied by the coverage.
///
/// Groups with undefined dispersion keep their place in the output with
/// [`IntervalBounds::Undefined`] rather than failing the whole batch.
#[derive(Debug, Clone)]
pub struct IntervalSummarizer {
    coverage: CoverageSpec,
    pi_mode: PiMode,
}

impl IntervalSummarizer {
    /// Create a summarizer at the given coverage, with the default PI mode
    pub fn new(coverage: CoverageSpec) -> Self {
        Self {
            coverage,
            pi_mode: PiMode::default(),
        }
    }

    /// Select how prediction intervals are derived
    pub fn with_pi_mode(mut self, pi_mode: PiMode) -> Self {
        self.pi_mode = pi_mode;
        self
    }

    /// The configured coverage
    pub fn coverage(&self) -> CoverageSpec {
        self.coverage
    }

    /// The configured PI mode
    pub fn pi_mode(&self) -> PiMode {
        self.pi_mode
    }

    /// Summarize observations into parallel CI and PI collections
    ///
    /// Fails fast on an empty batch; per-group degeneracy is reported in
    /// the result, not as an error.
    #[instrument(skip(self, observations), fields(
        n_obs = observations.len(),
        k = self.coverage.k(),
        pi_mode = self.pi_mode.name(),
    ))]
    pub fn summarize(&self, observations: &[Observation]) -> Result<IntervalSummary> {
        if observations.is_empty() {
            return Err(Error::empty_input("summarize"));
        }

        let groups = group_observations(observations);
        debug!(
            n_groups = groups.len(),
            coverage = self.coverage.coverage(),
            "summarizing groups"
        );

        let mut ci = Vec::with_capacity(groups.len());
        let mut pi = Vec::with_capacity(groups.len());

        for (key, mut values) in groups {
            let moments = GroupMoments::from_values(&values)?;

            ci.push(IntervalEstimate {
                key: key.clone(),
                kind: IntervalKind::Ci,
                n: moments.n,
                mean: moments.mean,
                coverage: self.coverage.coverage(),
                bounds: self.ci_bounds(&moments),
            });

            values.sort_by(|a, b| a.total_cmp(b));
            pi.push(IntervalEstimate {
                key,
                kind: IntervalKind::Pi,
                n: moments.n,
                mean: moments.mean,
                coverage: self.coverage.coverage(),
                bounds: self.pi_bounds(&moments, &values)?,
            });
        }

        Ok(IntervalSummary {
            ci,
            pi,
            coverage: self.coverage.coverage(),
        })
    }

    /// CI on the mean: mean +/- k * sd / sqrt(n)
    fn ci_bounds(&self, moments: &GroupMoments) -> IntervalBounds {
        match moments.standard_error() {
            Some(se) => {
                let margin = self.coverage.k() * se;
                IntervalBounds::Known {
                    lower: moments.mean - margin,
                    upper: moments.mean + margin,
                }
            }
            None => IntervalBounds::Undefined,
        }
    }

    fn pi_bounds(&self, moments: &GroupMoments, sorted: &[f64]) -> Result<IntervalBounds> {
        match self.pi_mode {
            PiMode::Moment => Ok(match moments.sd {
                Some(sd) => {
                    let margin = self.coverage.k() * sd;
                    IntervalBounds::Known {
                        lower: moments.mean - margin,
                        upper: moments.mean + margin,
                    }
                }
                None => IntervalBounds::Undefined,
            }),
            PiMode::Quantile => {
                let lower = empirical_quantile(sorted, self.coverage.lower_percentile())?;
                let upper = empirical_quantile(sorted, self.coverage.upper_percentile())?;
                Ok(IntervalBounds::Known { lower, upper })
            }
        }
    }
}

impl Default for IntervalSummarizer {
    fn default() -> Self {
        Self::new(CoverageSpec::default())
    }
}
