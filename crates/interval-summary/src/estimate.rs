//! Interval estimate types

use interval_core::GroupKey;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which interval family an estimate belongs to
///
/// Every consumer matches on this tag exhaustively; there is no string
/// dispatch anywhere in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntervalKind {
    /// Confidence interval on the group mean
    Ci,
    /// Prediction interval for individual outcomes
    Pi,
}

impl IntervalKind {
    /// Short lowercase name for logs and file names
    pub fn name(&self) -> &'static str {
        match self {
            Self::Ci => "ci",
            Self::Pi => "pi",
        }
    }
}

impl fmt::Display for IntervalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ci => write!(f, "CI"),
            Self::Pi => write!(f, "PI"),
        }
    }
}

/// Computed bounds for one group, or an explicit degenerate marker
///
/// `Undefined` flags groups whose interval cannot be computed (a single
/// observation under a dispersion-based formula). It keeps the group's
/// place in the output instead of fabricating a zero-width interval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum IntervalBounds {
    /// Both bounds are defined
    Known { lower: f64, upper: f64 },
    /// The interval is undefined for this group
    Undefined,
}

impl IntervalBounds {
    /// Lower bound, if defined
    pub fn lower(&self) -> Option<f64> {
        match self {
            Self::Known { lower, .. } => Some(*lower),
            Self::Undefined => None,
        }
    }

    /// Upper bound, if defined
    pub fn upper(&self) -> Option<f64> {
        match self {
            Self::Known { upper, .. } => Some(*upper),
            Self::Undefined => None,
        }
    }

    /// Width of the interval, if defined
    pub fn width(&self) -> Option<f64> {
        match self {
            Self::Known { lower, upper } => Some(upper - lower),
            Self::Undefined => None,
        }
    }

    /// Whether both bounds are defined
    pub fn is_defined(&self) -> bool {
        matches!(self, Self::Known { .. })
    }
}

/// One summarized interval for one (condition, facet) group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalEstimate {
    /// Group identity; match on this, not on position
    pub key: GroupKey,
    /// Interval family
    pub kind: IntervalKind,
    /// Number of observations in the group
    pub n: usize,
    /// Group sample mean
    pub mean: f64,
    /// Nominal coverage shared by every estimate of the run
    pub coverage: f64,
    /// Interval bounds or the degenerate marker
    pub bounds: IntervalBounds,
}

impl IntervalEstimate {
    /// Whether a value falls inside the interval (false when undefined)
    pub fn contains(&self, value: f64) -> bool {
        match self.bounds {
            IntervalBounds::Known { lower, upper } => value >= lower && value <= upper,
            IntervalBounds::Undefined => false,
        }
    }
}

impl fmt::Display for IntervalEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            IntervalBounds::Known { lower, upper } => write!(
                f,
                "{} {}: [{:.4}, {:.4}], mean {:.4} (n = {})",
                self.key, self.kind, lower, upper, self.mean, self.n
            ),
            IntervalBounds::Undefined => write!(
                f,
                "{} {}: undefined, mean {:.4} (n = {})",
                self.key, self.kind, self.mean, self.n
            ),
        }
    }
}

/// Parallel CI and PI collections produced by one summarize call
///
/// Both collections hold one estimate per group, keyed by `GroupKey`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntervalSummary {
    /// Confidence intervals, one per group
    pub ci: Vec<IntervalEstimate>,
    /// Prediction intervals, one per group
    pub pi: Vec<IntervalEstimate>,
    /// Nominal coverage both collections were computed at
    pub coverage: f64,
}

impl IntervalSummary {
    /// All estimates of one kind
    pub fn of_kind(&self, kind: IntervalKind) -> &[IntervalEstimate] {
        match kind {
            IntervalKind::Ci => &self.ci,
            IntervalKind::Pi => &self.pi,
        }
    }

    /// Look up one group's estimate by identity
    pub fn find(&self, kind: IntervalKind, key: &GroupKey) -> Option<&IntervalEstimate> {
        self.of_kind(kind).iter().find(|est| &est.key == key)
    }

    /// Number of groups summarized
    pub fn group_count(&self) -> usize {
        self.ci.len()
    }

    /// Whether the summary holds no groups at all
    pub fn is_empty(&self) -> bool {
        self.ci.is_empty() && self.pi.is_empty()
    }

    /// Ordered distinct facets across both collections
    pub fn facets(&self) -> Vec<String> {
        let mut facets: Vec<String> = self.ci.iter().map(|est| est.key.facet.clone()).collect();
        facets.sort();
        facets.dedup();
        facets
    }

    /// Ordered distinct conditions across both collections
    pub fn conditions(&self) -> Vec<String> {
        let mut conditions: Vec<String> =
            self.ci.iter().map(|est| est.key.condition.clone()).collect();
        conditions.sort();
        conditions.dedup();
        conditions
    }

    /// Smallest and largest plotted value over means and defined bounds
    pub fn value_extent(&self) -> Option<(f64, f64)> {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for est in self.ci.iter().chain(self.pi.iter()) {
            min = min.min(est.mean);
            max = max.max(est.mean);
            if let IntervalBounds::Known { lower, upper } = est.bounds {
                min = min.min(lower);
                max = max.max(upper);
            }
        }
        if min.is_finite() && max.is_finite() {
            Some((min, max))
        } else {
            None
        }
    }
}
