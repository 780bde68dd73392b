//! Per-group sample moments and empirical quantiles

use crate::{Error, Result};

/// Sample size, mean, and dispersion for one group
///
/// The standard deviation is Bessel-corrected and explicitly absent when
/// the group holds fewer than two observations. A missing `sd` is the
/// degenerate-group marker; it is never reported as zero dispersion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupMoments {
    /// Number of observations
    pub n: usize,
    /// Sample mean
    pub mean: f64,
    /// Bessel-corrected sample standard deviation, `None` when n < 2
    pub sd: Option<f64>,
}

impl GroupMoments {
    /// Compute moments from raw values
    pub fn from_values(values: &[f64]) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::empty_input("group moments"));
        }
        if values.iter().any(|v| !v.is_finite()) {
            return Err(Error::non_finite("observation values"));
        }

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let sd = if n < 2 {
            None
        } else {
            let variance =
                values.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
            Some(variance.sqrt())
        };

        Ok(Self { n, mean, sd })
    }

    /// Standard error of the mean, `None` when the sd is undefined
    pub fn standard_error(&self) -> Option<f64> {
        self.sd.map(|sd| sd / (self.n as f64).sqrt())
    }
}

/// Empirical quantile by linear interpolation between order statistics
///
/// Uses the Hyndman-Fan type 7 definition shared by the default quantile
/// of most statistical software: position `h = (n - 1) p`, interpolating
/// between the order statistics at `floor(h)` and `ceil(h)`. Input must
/// be sorted ascending.
pub fn empirical_quantile(sorted: &[f64], p: f64) -> Result<f64> {
    if sorted.is_empty() {
        return Err(Error::empty_input("empirical quantile"));
    }
    if !(0.0..=1.0).contains(&p) || p.is_nan() {
        return Err(Error::invalid_probability(p));
    }

    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    Ok(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}
