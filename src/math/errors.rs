use thiserror::Error;

/// Data-validity failures detected at the comparison boundary.
///
/// All of these are deterministic: retrying never helps, and a failed pair must
/// not abort comparisons of other pairs. Callers are expected to flag or skip
/// the offending curve pair.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompareError {
    #[error("unequal length: x has {x_len} elements, y has {y_len}")]
    MismatchedLengths { x_len: usize, y_len: usize },

    #[error("insufficient points: got {got}, need at least 2")]
    InsufficientPoints { got: usize },

    #[error("curve domains do not overlap: [{x_min}, {x_max}] is empty or a single point")]
    DegenerateDomain { x_min: f64, x_max: f64 },
}
