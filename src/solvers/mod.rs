//! Fixed-step forward Euler integrators for a small set of circuit topologies.
//!
//! Every solver is configured once, immutably, and each `solve` call allocates and
//! returns a fresh dense trace. Nothing carries over between calls, so a solver can be
//! shared across threads and called concurrently.

use std::fmt;

use crate::constants::{RC_FIDELITY_FACTOR, RLC_RECOMMENDED_DIVISOR};
use crate::errors::{CircuitError, Result};
use crate::math::{nearly_equal, Scalar};

/// Closed-form RC responses used as references.
pub mod analytic;
/// Diode-fed capacitor with a resistive load.
pub mod diode_rc;
/// First-order linear RC.
pub mod linear_rc;
/// First-order RC with a nonlinear series device.
pub mod nonlinear_rc;
/// Second-order series RLC.
pub mod rlc;

pub use diode_rc::{DiodeRcSolver, DiodeRcTrace};
pub use linear_rc::{LinearRcSolver, RcTrace};
pub use nonlinear_rc::{NonlinearRcSolver, NonlinearRcTrace};
pub use rlc::{CircuitParams, DampedOscillation, Damping, RlcSolver, RlcTrace};

/// Non-fatal advisory: the step is inside the stable range but coarse for accuracy.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FidelityWarning {
    /// Linear RC step above `0.05·τ`.
    CoarseRcStep {
        /// Requested step in seconds.
        dt: Scalar,
        /// Circuit time constant in seconds.
        tau: Scalar,
    },
    /// RLC step above `T₀/20`.
    CoarseRlcStep {
        /// Requested step in seconds.
        dt: Scalar,
        /// Undamped natural period in seconds.
        natural_period: Scalar,
    },
}

impl FidelityWarning {
    /// Step size the solver recommends for good accuracy.
    #[must_use]
    pub fn recommended_dt(&self) -> Scalar {
        match *self {
            Self::CoarseRcStep { tau, .. } => RC_FIDELITY_FACTOR * tau,
            Self::CoarseRlcStep { natural_period, .. } => natural_period / RLC_RECOMMENDED_DIVISOR,
        }
    }
}

impl fmt::Display for FidelityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::CoarseRcStep { dt, tau } => write!(
                f,
                "time step dt={dt:.3e} s is large relative to τ={tau:.3e} s; consider dt ≤ {:.3e} s",
                self.recommended_dt()
            ),
            Self::CoarseRlcStep { dt, natural_period } => write!(
                f,
                "time step dt={dt:.3e} s may be too large for natural period T₀={natural_period:.3e} s; consider dt ≤ {:.3e} s",
                self.recommended_dt()
            ),
        }
    }
}

/// Common view over the dense sequences a solve returns.
///
/// All sequences of a trace have the same length and are aligned by index.
pub trait Trace {
    /// Sample times in seconds, starting at 0.
    fn time(&self) -> &[Scalar];

    /// Source value at each sample.
    fn source(&self) -> &[Scalar];

    /// Number of samples.
    fn len(&self) -> usize {
        self.time().len()
    }

    /// True if no samples recorded.
    fn is_empty(&self) -> bool {
        self.time().is_empty()
    }
}

const GRID_TOLERANCE: Scalar = 1e-9;

/// Number of `dt` intervals needed to cover `t_end`, tolerant of round-off in `t_end/dt`.
fn interval_count(t_end: Scalar, dt: Scalar) -> usize {
    let ratio = t_end / dt;
    let rounded = ratio.round();
    // Snapping to zero would drop the origin for a horizon shorter than one step.
    if rounded >= 1.0 && nearly_equal(ratio, rounded, GRID_TOLERANCE) {
        rounded as usize
    } else {
        ratio.ceil() as usize
    }
}

fn ensure_horizon(t_end: Scalar) -> Result<Scalar> {
    if t_end.is_finite() && t_end >= 0.0 {
        Ok(t_end)
    } else {
        Err(CircuitError::InvalidParameter {
            name: "t_end",
            value: t_end,
        })
    }
}

/// Closed grid `0, dt, 2dt, …, t_end` of `⌈t_end/dt⌉ + 1` samples.
///
/// Spacing is exactly `dt` except for the last sample, which is pinned to `t_end`.
pub(crate) fn closed_grid(t_end: Scalar, dt: Scalar) -> Result<Vec<Scalar>> {
    let t_end = ensure_horizon(t_end)?;
    let intervals = interval_count(t_end, dt);
    let mut time: Vec<Scalar> = (0..=intervals).map(|k| k as Scalar * dt).collect();
    if let Some(last) = time.last_mut() {
        *last = t_end;
    }
    Ok(time)
}

/// Half-open grid `0, dt, 2dt, …` strictly below `t_end`; always holds at least `0`.
pub(crate) fn half_open_grid(t_end: Scalar, dt: Scalar) -> Result<Vec<Scalar>> {
    let t_end = ensure_horizon(t_end)?;
    if t_end == 0.0 {
        return Err(CircuitError::InvalidParameter {
            name: "t_end",
            value: t_end,
        });
    }
    Ok((0..interval_count(t_end, dt).max(1))
        .map(|k| k as Scalar * dt)
        .collect())
}
