//! Shared numerical primitives anchored on `nalgebra`.

use nalgebra::{Matrix2, Vector2};

/// Primary scalar type used across the crate.
pub type Scalar = f64;
/// Two-component state vector (e.g. `[vC, iL]` of a series RLC).
pub type State2 = Vector2<Scalar>;
/// Two-by-two state matrix of a linear second-order system.
pub type StateMatrix2 = Matrix2<Scalar>;

/// Returns `true` when `a` and `b` agree to within a relative tolerance of `rel`.
#[must_use]
pub(crate) fn nearly_equal(a: Scalar, b: Scalar, rel: Scalar) -> bool {
    (a - b).abs() <= rel * a.abs().max(b.abs()).max(1.0)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn state_matrix_product_matches_hand_expansion() {
        let a = StateMatrix2::new(0.0, 2.0, -1.0, -3.0);
        let x = State2::new(1.0, 4.0);
        let y = a * x;
        assert_relative_eq!(y[0], 8.0);
        assert_relative_eq!(y[1], -13.0);
    }

    #[test]
    fn nearly_equal_scales_with_magnitude() {
        assert!(nearly_equal(250.0, 250.000_000_000_03, 1e-12));
        assert!(!nearly_equal(250.0, 250.1, 1e-12));
    }
}
