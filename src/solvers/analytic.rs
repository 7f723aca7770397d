//! Exact solutions of `dx/dt = (u(t) − x)/τ` for the canonical inputs.

use crate::math::Scalar;

/// Step input `A·u(t)` from `x(0) = x0`: `x(t) = A + (x0 − A)·e^{−t/τ}`.
#[must_use]
pub fn rc_step_response(amplitude: Scalar, x0: Scalar, tau: Scalar, t: Scalar) -> Scalar {
    amplitude + (x0 - amplitude) * (-t / tau).exp()
}

/// Ramp input `A·t·u(t)` from `x(0) = x0`: `x(t) = A(t − τ) + (x0 + Aτ)·e^{−t/τ}`.
#[must_use]
pub fn rc_ramp_response(slope: Scalar, x0: Scalar, tau: Scalar, t: Scalar) -> Scalar {
    slope * (t - tau) + (x0 + slope * tau) * (-t / tau).exp()
}

/// Steady state for `A·sin(ωt)`: `A/√(1 + (ωτ)²)·sin(ωt − atan(ωτ))`.
///
/// The decaying transient is not included, so this only matches a simulation once
/// several time constants have elapsed.
#[must_use]
pub fn rc_sinusoid_steady_state(amplitude: Scalar, omega: Scalar, tau: Scalar, t: Scalar) -> Scalar {
    let wt = omega * tau;
    let magnitude = amplitude / (1.0 + wt * wt).sqrt();
    magnitude * (omega * t - wt.atan()).sin()
}
