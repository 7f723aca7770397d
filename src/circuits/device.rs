//! Nonlinear two-terminal devices described only by a current law `i(v)`.

use crate::constants::MILLI;
use crate::errors::{ensure_positive, CircuitError, Result};
use crate::math::Scalar;

/// A device whose branch current is a (possibly nonlinear) function of its terminal voltage.
///
/// Implemented for the built-in devices and for any `Fn(Scalar) -> Scalar`, so a closure
/// can stand in for a device model in a solver.
pub trait NonlinearDevice {
    /// Current in amperes for a terminal voltage in volts.
    fn current(&self, voltage: Scalar) -> Scalar;
}

impl<F> NonlinearDevice for F
where
    F: Fn(Scalar) -> Scalar,
{
    fn current(&self, voltage: Scalar) -> Scalar {
        self(voltage)
    }
}

/// Square-law device `i = k·v²`.
///
/// The current is non-negative and symmetric in `v`; doubling the voltage quadruples it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadraticDevice {
    k: Scalar,
}

impl QuadraticDevice {
    /// Coefficient used by [`Default`], in A/V².
    pub const DEFAULT_COEFFICIENT: Scalar = 0.01;

    /// Creates a device with coefficient `k` in A/V²; fails unless `k` is positive.
    pub fn new(k: Scalar) -> Result<Self> {
        Ok(Self {
            k: ensure_positive("k", k)?,
        })
    }

    /// Quadratic coefficient in A/V².
    #[must_use]
    pub fn coefficient(&self) -> Scalar {
        self.k
    }

    /// Incremental conductance `di/dv = 2kv` in siemens.
    #[must_use]
    pub fn conductance(&self, voltage: Scalar) -> Scalar {
        2.0 * self.k * voltage
    }

    /// Incremental resistance `dv/di = 1/(2kv)`; infinite (an error) at `v = 0`.
    pub fn resistance(&self, voltage: Scalar) -> Result<Scalar> {
        if voltage.abs() < 1e-12 {
            return Err(CircuitError::DomainUndefined(
                "incremental resistance at v = 0",
            ));
        }
        Ok(1.0 / (2.0 * self.k * voltage))
    }

    /// Power `v·i = k·v³` in watts.
    #[must_use]
    pub fn power(&self, voltage: Scalar) -> Scalar {
        self.k * voltage.powi(3)
    }
}

impl Default for QuadraticDevice {
    fn default() -> Self {
        Self {
            k: Self::DEFAULT_COEFFICIENT,
        }
    }
}

impl NonlinearDevice for QuadraticDevice {
    fn current(&self, voltage: Scalar) -> Scalar {
        self.k * voltage * voltage
    }
}

/// Three-region diode-like reference device.
///
/// In milliamperes: `0.1·v` for `v < 0`, `(2/3)·v` for `0 ≤ v ≤ 3` and `(v − 3)² + 2` above.
/// The law is continuous at both breakpoints with a slope jump at each.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PiecewiseDiode;

impl PiecewiseDiode {
    /// Boundary between the reverse and linear forward regions, in volts.
    pub const KNEE_LOW: Scalar = 0.0;
    /// Boundary between the linear and quadratic forward regions, in volts.
    pub const KNEE_HIGH: Scalar = 3.0;

    /// Creates the device.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn current_ma(v: Scalar) -> Scalar {
        if v < Self::KNEE_LOW {
            0.1 * v
        } else if v <= Self::KNEE_HIGH {
            (2.0 / 3.0) * v
        } else {
            let over = v - Self::KNEE_HIGH;
            over * over + 2.0
        }
    }
}

impl NonlinearDevice for PiecewiseDiode {
    fn current(&self, voltage: Scalar) -> Scalar {
        Self::current_ma(voltage) * MILLI
    }
}
