//! Common-grid resampling via linear interpolation.
//!
//! Two curves rarely share abscissa values (different solvers emit different
//! output steps), so before any metric can be computed both curves are
//! re-evaluated on one shared grid:
//!
//! - the grid spans only the *intersection* of the two x-ranges, so no point
//!   ever requires extrapolation
//! - the grid density is `2 * max(len(sample_x), len(target_x))`, a fixed 2x
//!   oversampling of the denser input
//! - each grid point is generated as `x_min + i * step` (count-based), so the
//!   grid always has exactly `n` points and ends exactly at `x_max`
//!
//! Each curve's ordinates are then evaluated at every grid point by locating
//! the bracketing interval in the curve's own x-array (binary search, clamped
//! at the array edges) and evaluating the line through the interval endpoints.

use crate::math::errors::CompareError;

/// Two curves evaluated on one shared abscissa grid.
///
/// All three vectors have the same length; `sample_y[i]` and `target_y[i]`
/// are the two curves' interpolated ordinates at `common_x[i]`.
#[derive(Debug, Clone)]
pub struct ResampledPair {
    pub common_x: Vec<f64>,
    pub sample_y: Vec<f64>,
    pub target_y: Vec<f64>,
}

/// Resample two curves onto their common abscissa grid.
///
/// Assumes both x-arrays are sorted ascending (the server returns them that
/// way). Fails fast on malformed input rather than propagating NaNs:
///
/// - [`CompareError::MismatchedLengths`] if a curve's `x`/`y` lengths differ
/// - [`CompareError::InsufficientPoints`] if a curve has fewer than 2 points
/// - [`CompareError::DegenerateDomain`] if the x-ranges overlap in at most
///   one point
pub fn resample_to_common_grid(
    sample_x: &[f64],
    sample_y: &[f64],
    target_x: &[f64],
    target_y: &[f64],
) -> Result<ResampledPair, CompareError> {
    validate_curve(sample_x, sample_y)?;
    validate_curve(target_x, target_y)?;

    let x_min = sample_x[0].max(target_x[0]);
    let x_max = sample_x[sample_x.len() - 1].min(target_x[target_x.len() - 1]);
    if x_max <= x_min {
        return Err(CompareError::DegenerateDomain { x_min, x_max });
    }

    let n = 2 * sample_x.len().max(target_x.len());
    let step = (x_max - x_min) / (n as f64 - 1.0);

    let mut common_x = Vec::with_capacity(n);
    for i in 0..n {
        common_x.push(x_min + i as f64 * step);
    }

    let new_sample_y = evaluate_linear(&common_x, sample_x, sample_y);
    let new_target_y = evaluate_linear(&common_x, target_x, target_y);

    Ok(ResampledPair {
        common_x,
        sample_y: new_sample_y,
        target_y: new_target_y,
    })
}

fn validate_curve(x: &[f64], y: &[f64]) -> Result<(), CompareError> {
    if x.len() != y.len() {
        return Err(CompareError::MismatchedLengths {
            x_len: x.len(),
            y_len: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(CompareError::InsufficientPoints { got: x.len() });
    }
    Ok(())
}

/// Index of the left border of the interval `[x[i], x[i+1]]` bracketing `p`.
///
/// Points before `x[0]` clamp to the first interval and points after
/// `x[len-1]` clamp to the last one, so the returned index is always a valid
/// left endpoint (`i + 1 < x.len()`). The callers only hand in points inside
/// the common domain, so clamping never silently extrapolates; it only covers
/// exact-boundary hits and floating-point dust at the grid edges.
pub(crate) fn interval_index(x: &[f64], p: f64) -> usize {
    if p < x[0] {
        return 0;
    }
    if p > x[x.len() - 1] {
        return x.len() - 2;
    }

    let mut left = 0;
    let mut right = x.len() - 1;
    while right - left != 1 {
        let mid = left + (right - left) / 2;
        if p >= x[mid] {
            left = mid;
        } else {
            right = mid;
        }
    }
    left
}

/// Evaluate the piecewise-linear function defined by `(x, y)` at each point.
fn evaluate_linear(points: &[f64], x: &[f64], y: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(points.len());
    for &p in points {
        let i = interval_index(x, p);
        out.push(lerp(x[i], x[i + 1], y[i], y[i + 1], p));
    }
    out
}

#[inline]
fn lerp(x0: f64, x1: f64, y0: f64, y1: f64, xq: f64) -> f64 {
    y0 + (y1 - y0) * (xq - x0) / (x1 - x0)
}
