//! Nominal interval coverage
//!
//! Coverage is parameterized by a standard-deviation multiple `k`
//! and converted through the standard normal CDF, so that `k = 1` means
//! roughly 68% coverage and `k = 2` roughly 95%.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use statrs::function::erf;
use std::f64::consts::SQRT_2;
use std::fmt;

/// Nominal interval coverage expressed as a standard-deviation multiple
///
/// `k = 0` is legal and degenerate: coverage is zero and intervals built
/// from it collapse to their center. Only `k` is stored; the coverage is
/// always derived from it, so specs with equal `k` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageSpec {
    k: f64,
}

impl CoverageSpec {
    /// Coverage at one standard deviation, the study default
    pub const ONE_SD: Self = Self { k: 1.0 };

    /// Create a coverage spec from a standard-deviation multiple
    ///
    /// Rejects negative and non-finite `k` before any data is touched.
    pub fn new(k: f64) -> Result<Self> {
        if !k.is_finite() || k < 0.0 {
            return Err(Error::invalid_coverage(k));
        }
        Ok(Self { k })
    }

    /// The standard-deviation multiple
    pub fn k(&self) -> f64 {
        self.k
    }

    /// Nominal coverage Phi(k) - Phi(-k), in [0, 1]
    ///
    /// Mathematically below 1 for every finite `k`, but the f64 value
    /// saturates to exactly 1.0 once `k` is large enough (about 8.3)
    /// that the tail mass falls below machine resolution.
    pub fn coverage(&self) -> f64 {
        // Phi(k) - Phi(-k) = erf(k / sqrt(2))
        erf::erf(self.k / SQRT_2)
    }

    /// Lower tail probability, (1 - coverage) / 2
    pub fn lower_percentile(&self) -> f64 {
        (1.0 - self.coverage()) / 2.0
    }

    /// Upper tail probability, 1 - lower
    pub fn upper_percentile(&self) -> f64 {
        1.0 - self.lower_percentile()
    }
}

impl Default for CoverageSpec {
    fn default() -> Self {
        Self::ONE_SD
    }
}

impl fmt::Display for CoverageSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}% (k = {})", self.coverage() * 100.0, self.k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_one_sd_coverage() {
        let spec = CoverageSpec::new(1.0).unwrap();
        assert_relative_eq!(spec.coverage(), 0.682_689_492_137_085_9, epsilon = 1e-9);
        assert_relative_eq!(spec.lower_percentile(), 0.1587, epsilon = 1e-4);
        assert_relative_eq!(spec.upper_percentile(), 0.8413, epsilon = 1e-4);
    }

    #[test]
    fn test_one_sd_const_matches_new() {
        let spec = CoverageSpec::new(1.0).unwrap();
        assert_eq!(spec, CoverageSpec::ONE_SD);
        assert_eq!(spec, CoverageSpec::default());
        assert_eq!(spec.coverage(), CoverageSpec::ONE_SD.coverage());
    }

    #[test]
    fn test_two_sd_coverage() {
        let spec = CoverageSpec::new(2.0).unwrap();
        assert_relative_eq!(spec.coverage(), 0.9545, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_k_is_legal() {
        let spec = CoverageSpec::new(0.0).unwrap();
        assert_eq!(spec.coverage(), 0.0);
        assert_relative_eq!(spec.lower_percentile(), 0.5, epsilon = 1e-12);
        assert_relative_eq!(spec.upper_percentile(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_k_rejected() {
        assert!(CoverageSpec::new(-0.1).is_err());
        assert!(CoverageSpec::new(f64::NAN).is_err());
        assert!(CoverageSpec::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_coverage_monotone_in_k() {
        let ks = [0.0, 0.5, 1.0, 1.5, 2.0, 2.5, 3.0];
        let mut previous = -1.0;
        for k in ks {
            let coverage = CoverageSpec::new(k).unwrap().coverage();
            assert!(coverage > previous, "coverage must increase with k");
            assert!((0.0..1.0).contains(&coverage));
            previous = coverage;
        }
    }

    #[test]
    fn test_extreme_k_saturates() {
        let spec = CoverageSpec::new(10.0).unwrap();
        assert_eq!(spec.coverage(), 1.0);
        assert_eq!(spec.lower_percentile(), 0.0);
        assert_eq!(spec.upper_percentile(), 1.0);
    }

    #[test]
    fn test_percentiles_bracket_half() {
        let spec = CoverageSpec::new(1.5).unwrap();
        assert!(spec.lower_percentile() < 0.5);
        assert!(spec.upper_percentile() > 0.5);
        assert_relative_eq!(
            spec.upper_percentile() - spec.lower_percentile(),
            spec.coverage(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_display() {
        let spec = CoverageSpec::new(1.0).unwrap();
        let text = format!("{spec}");
        assert!(text.contains("68.3%"));
        assert!(text.contains("k = 1"));
    }
}
