//! Deviation metrics between a sample curve and a target curve.
//!
//! Three complementary metrics are computed from *one* resampled pair, so they
//! are always internally consistent:
//!
//! - **area metric**: per curve, the sum of squared trapezoid terms
//!   `((x[i] - x[i-1]) * (y[i] + y[i-1]) * 0.5)^2`, plus the relative ratio
//!   `(sample - target) / target`. Note the square is applied to each
//!   trapezoid term, not to the integral sum; this matches the historical
//!   behavior of the report tool and is kept as-is.
//! - **sum of squares**: `sum((sample_y[i] - target_y[i])^2)`
//! - **max deviation**: `max(|sample_y[i] - target_y[i]|)`
//!
//! A comparison is a one-shot, stateless computation: construct, read the
//! metrics, discard.

use crate::math::errors::CompareError;
use crate::math::resample::{ResampledPair, resample_to_common_grid};

/// Squared-trapezoid area metric for both curves plus their relative ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AreaMetric {
    pub sample_area: f64,
    pub target_area: f64,
    /// `(sample_area - target_area) / target_area`.
    ///
    /// `None` when `target_area == 0` (e.g., a target that is identically
    /// zero), in which case the ratio is undefined. The other metrics stay
    /// valid; only the ratio is marked not-applicable, never a bare NaN.
    pub ratio: Option<f64>,
}

/// All deviation metrics for one (sample, target) pair.
///
/// Constructed eagerly by [`CurveComparison::compute`]; the fields are plain
/// values and never recomputed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveComparison {
    pub area: AreaMetric,
    pub sum_of_squares: f64,
    pub max_deviation: f64,
}

impl CurveComparison {
    /// Resample both curves onto their common grid and compute all metrics.
    ///
    /// Fails with the resampling errors of [`resample_to_common_grid`];
    /// curve pairs that pass resampling always produce finite metrics for
    /// finite inputs.
    pub fn compute(
        sample_x: &[f64],
        sample_y: &[f64],
        target_x: &[f64],
        target_y: &[f64],
    ) -> Result<Self, CompareError> {
        let pair = resample_to_common_grid(sample_x, sample_y, target_x, target_y)?;
        Ok(Self::from_resampled(&pair))
    }

    /// Compute the metrics from an already-resampled pair.
    pub fn from_resampled(pair: &ResampledPair) -> Self {
        let sample_area = squared_trapezoid_area(&pair.common_x, &pair.sample_y);
        let target_area = squared_trapezoid_area(&pair.common_x, &pair.target_y);
        let ratio = if target_area == 0.0 {
            None
        } else {
            Some((sample_area - target_area) / target_area)
        };

        let mut sum_of_squares = 0.0;
        let mut max_deviation: f64 = 0.0;
        for (s, t) in pair.sample_y.iter().zip(&pair.target_y) {
            let delta = s - t;
            sum_of_squares += delta * delta;
            max_deviation = max_deviation.max(delta.abs());
        }

        Self {
            area: AreaMetric {
                sample_area,
                target_area,
                ratio,
            },
            sum_of_squares,
            max_deviation,
        }
    }
}

/// Sum of squared trapezoid terms over adjacent grid points.
fn squared_trapezoid_area(x: &[f64], y: &[f64]) -> f64 {
    let mut area = 0.0;
    for i in 1..x.len() {
        let term = (x[i] - x[i - 1]) * (y[i] + y[i - 1]) * 0.5;
        area += term * term;
    }
    area
}
