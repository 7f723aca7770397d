//! Sample-grid utilities and post-processing helpers.

use crate::math::Scalar;

/// Generates `n` linearly spaced samples in [start, stop].
#[must_use]
pub fn linspace(start: Scalar, stop: Scalar, n: usize) -> Vec<Scalar> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n as Scalar - 1.0);
            (0..n).map(|i| start + step * i as Scalar).collect()
        }
    }
}

/// Largest absolute difference between two equally long sequences.
///
/// Returns `None` when the lengths differ or both are empty.
#[must_use]
pub fn max_abs_error(a: &[Scalar], b: &[Scalar]) -> Option<Scalar> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }
    Some(
        a.iter()
            .zip(b)
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, Scalar::max),
    )
}
