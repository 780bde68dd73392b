//! One-shot inferential reports over condition groups
//!
//! Straightforward test-and-report calls: Welch's t, one-way ANOVA,
//! uncorrected pairwise comparisons, and Cohen's d. Every function
//! returns a typed result with a `Display` impl suitable for a report
//! line; nothing here makes decisions.

use crate::{Error, Result};
use interval_core::{GroupMoments, Observation};
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// Welch's two-sample t-test, two-sided
#[derive(Debug, Clone, PartialEq)]
pub struct WelchTTest {
    pub t: f64,
    pub df: f64,
    pub p: f64,
}

impl fmt::Display for WelchTTest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t({:.1}) = {:.3}, p = {:.4}", self.df, self.t, self.p)
    }
}

/// One-way ANOVA across condition groups
#[derive(Debug, Clone, PartialEq)]
pub struct OneWayAnova {
    pub f: f64,
    pub df_between: f64,
    pub df_within: f64,
    pub p: f64,
}

impl fmt::Display for OneWayAnova {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "F({:.0}, {:.0}) = {:.3}, p = {:.4}",
            self.df_between, self.df_within, self.f, self.p
        )
    }
}

/// One uncorrected pairwise comparison
#[derive(Debug, Clone, PartialEq)]
pub struct PairwiseComparison {
    pub condition_a: String,
    pub condition_b: String,
    pub test: WelchTTest,
}

impl fmt::Display for PairwiseComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}: {}", self.condition_a, self.condition_b, self.test)
    }
}

/// Cohen's conventional effect magnitudes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectMagnitude {
    Negligible,
    Small,
    Medium,
    Large,
}

impl EffectMagnitude {
    pub fn from_d(d: f64) -> Self {
        let abs = d.abs();
        if abs < 0.2 {
            Self::Negligible
        } else if abs < 0.5 {
            Self::Small
        } else if abs < 0.8 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

impl fmt::Display for EffectMagnitude {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Negligible => "negligible",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
        };
        write!(f, "{name}")
    }
}

/// Standardized mean difference with a pooled spread
#[derive(Debug, Clone, PartialEq)]
pub struct CohensD {
    pub d: f64,
    pub magnitude: EffectMagnitude,
    pub n_a: usize,
    pub n_b: usize,
}

impl fmt::Display for CohensD {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d = {:.3} ({})", self.d, self.magnitude)
    }
}

/// Pools observations by condition across facets, sorted by condition.
pub fn condition_groups(observations: &[Observation]) -> Vec<(String, Vec<f64>)> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.condition.clone()).or_default().push(obs.value);
    }
    groups.into_iter().collect()
}

/// Welch's unequal-variance t-test between two samples, two-sided.
pub fn welch_t_test(a: &[f64], b: &[f64]) -> Result<WelchTTest> {
    let (moments_a, sd_a) = spread_moments(a)?;
    let (moments_b, sd_b) = spread_moments(b)?;

    let n_a = moments_a.n as f64;
    let n_b = moments_b.n as f64;
    let var_a = sd_a * sd_a / n_a;
    let var_b = sd_b * sd_b / n_b;
    let pooled = var_a + var_b;
    if pooled <= 0.0 {
        return Err(Error::Core(interval_core::Error::Computation(
            "both samples have zero variance".to_string(),
        )));
    }

    let t = (moments_a.mean - moments_b.mean) / pooled.sqrt();
    // Welch-Satterthwaite degrees of freedom
    let df = pooled * pooled / (var_a * var_a / (n_a - 1.0) + var_b * var_b / (n_b - 1.0));

    let dist = StudentsT::new(0.0, 1.0, df).map_err(|e| {
        Error::Core(interval_core::Error::Computation(format!(
            "t-distribution with df {df}: {e}"
        )))
    })?;
    let p = 2.0 * (1.0 - dist.cdf(t.abs()));

    Ok(WelchTTest { t, df, p })
}

/// One-way ANOVA over two or more groups.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<OneWayAnova> {
    if groups.len() < 2 {
        return Err(Error::Core(interval_core::Error::InsufficientData {
            expected: 2,
            actual: groups.len(),
        }));
    }

    let mut total = 0usize;
    let mut grand_sum = 0.0;
    let mut means = Vec::with_capacity(groups.len());
    for group in groups {
        let moments = GroupMoments::from_values(group)?;
        total += moments.n;
        grand_sum += moments.mean * moments.n as f64;
        means.push(moments.mean);
    }
    let grand_mean = grand_sum / total as f64;

    let df_between = (groups.len() - 1) as f64;
    let df_within = (total - groups.len()) as f64;
    if df_within <= 0.0 {
        return Err(Error::Core(interval_core::Error::InsufficientData {
            expected: groups.len() + 1,
            actual: total,
        }));
    }

    let ss_between: f64 = groups
        .iter()
        .zip(&means)
        .map(|(group, mean)| group.len() as f64 * (mean - grand_mean).powi(2))
        .sum();
    let ss_within: f64 = groups
        .iter()
        .zip(&means)
        .map(|(group, mean)| group.iter().map(|x| (x - mean).powi(2)).sum::<f64>())
        .sum();
    if ss_within <= 0.0 {
        return Err(Error::Core(interval_core::Error::Computation(
            "no within-group variance".to_string(),
        )));
    }

    let f = (ss_between / df_between) / (ss_within / df_within);
    let dist = FisherSnedecor::new(df_between, df_within).map_err(|e| {
        Error::Core(interval_core::Error::Computation(format!(
            "F-distribution ({df_between}, {df_within}): {e}"
        )))
    })?;
    let p = 1.0 - dist.cdf(f);

    Ok(OneWayAnova {
        f,
        df_between,
        df_within,
        p,
    })
}

/// Welch tests over every condition pair, uncorrected.
pub fn pairwise_welch(groups: &[(String, Vec<f64>)]) -> Result<Vec<PairwiseComparison>> {
    let mut comparisons = Vec::new();
    for (i, (name_a, values_a)) in groups.iter().enumerate() {
        for (name_b, values_b) in groups.iter().skip(i + 1) {
            comparisons.push(PairwiseComparison {
                condition_a: name_a.clone(),
                condition_b: name_b.clone(),
                test: welch_t_test(values_a, values_b)?,
            });
        }
    }
    debug!(comparisons = comparisons.len(), "computed pairwise tests");
    Ok(comparisons)
}

/// Cohen's d with the classic pooled standard deviation.
pub fn cohen_d(a: &[f64], b: &[f64]) -> Result<CohensD> {
    let (moments_a, sd_a) = spread_moments(a)?;
    let (moments_b, sd_b) = spread_moments(b)?;

    let n_a = moments_a.n as f64;
    let n_b = moments_b.n as f64;
    let pooled_variance =
        ((n_a - 1.0) * sd_a * sd_a + (n_b - 1.0) * sd_b * sd_b) / (n_a + n_b - 2.0);
    if pooled_variance <= 0.0 {
        return Err(Error::Core(interval_core::Error::Computation(
            "pooled spread is zero".to_string(),
        )));
    }

    let d = (moments_a.mean - moments_b.mean) / pooled_variance.sqrt();
    Ok(CohensD {
        d,
        magnitude: EffectMagnitude::from_d(d),
        n_a: moments_a.n,
        n_b: moments_b.n,
    })
}

/// Moments plus a guaranteed sample sd, requiring at least two values.
fn spread_moments(values: &[f64]) -> Result<(GroupMoments, f64)> {
    let moments = GroupMoments::from_values(values)?;
    match moments.sd {
        Some(sd) => Ok((moments, sd)),
        None => Err(Error::Core(interval_core::Error::InsufficientData {
            expected: 2,
            actual: moments.n,
        })),
    }
}
