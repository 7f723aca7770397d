//! Unit conversions and fixed thresholds shared by the solvers.

use std::f64::consts::PI;

use crate::math::Scalar;

/// Forward Euler on `dx/dt = -x/τ` is stable only for `dt < 2τ`.
pub const RC_STABILITY_FACTOR: Scalar = 2.0;
/// Steps above `0.05·τ` are accepted but flagged as low fidelity.
pub const RC_FIDELITY_FACTOR: Scalar = 0.05;
/// RLC steps above `T₀/20` are accepted but flagged as low fidelity.
pub const RLC_FIDELITY_DIVISOR: Scalar = 20.0;
/// Recommended RLC step is `T₀/50`.
pub const RLC_RECOMMENDED_DIVISOR: Scalar = 50.0;
/// Milliamperes to amperes.
pub const MILLI: Scalar = 1.0e-3;

/// Returns the angular frequency corresponding to a linear frequency `hz`.
#[inline]
#[must_use]
pub fn angular_frequency(hz: Scalar) -> Scalar {
    2.0 * PI * hz
}

/// Returns the linear frequency in hertz for an angular frequency `omega`.
#[inline]
#[must_use]
pub fn hertz(omega: Scalar) -> Scalar {
    omega / (2.0 * PI)
}

/// Returns the period `2π/ω` in seconds.
#[inline]
#[must_use]
pub fn period(omega: Scalar) -> Scalar {
    2.0 * PI / omega
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn frequency_conversions_invert_each_other() {
        let omega = angular_frequency(50.0);
        assert_relative_eq!(hertz(omega), 50.0, max_relative = 1.0e-12);
        assert_relative_eq!(period(omega), 0.02, max_relative = 1.0e-12);
    }
}
