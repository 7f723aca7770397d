use num_complex::Complex;

use crate::errors::{ensure_positive, CircuitError, Result};
use crate::math::Scalar;
use crate::units::{Capacitance, Inductance, Resistance};

/// Trait implemented by the linear components, which expose a frequency-domain impedance.
pub trait Component {
    /// Returns the component's impedance for an angular frequency `omega` (rad/s).
    fn impedance(&self, omega: Scalar) -> Result<Complex<Scalar>>;

    /// Primary parameter: R in ohms, C in farads or L in henries.
    fn parameter(&self) -> Scalar;
}

/// Lumped resistor obeying Ohm's law `V = I·R`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistor {
    resistance: Resistance,
}

impl Resistor {
    /// Creates a resistor; fails unless `resistance_ohms` is positive.
    pub fn new(resistance_ohms: Scalar) -> Result<Self> {
        Ok(Self {
            resistance: Resistance::new(ensure_positive("R", resistance_ohms)?),
        })
    }

    /// Resistance magnitude in ohms.
    #[must_use]
    pub fn resistance(&self) -> Scalar {
        self.resistance.value()
    }

    /// Current `V/R` for a voltage across the resistor.
    #[must_use]
    pub fn current(&self, voltage: Scalar) -> Scalar {
        voltage / self.resistance()
    }

    /// Voltage `I·R` for a current through the resistor.
    #[must_use]
    pub fn voltage(&self, current: Scalar) -> Scalar {
        current * self.resistance()
    }

    /// Dissipated power `V²/R` in watts.
    #[must_use]
    pub fn power(&self, voltage: Scalar) -> Scalar {
        voltage * voltage / self.resistance()
    }
}

impl Component for Resistor {
    fn impedance(&self, _omega: Scalar) -> Result<Complex<Scalar>> {
        Ok(Complex::new(self.resistance(), 0.0))
    }

    fn parameter(&self) -> Scalar {
        self.resistance()
    }
}

/// Lumped capacitor model (ideal). Its voltage is a circuit state variable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Capacitor {
    capacitance: Capacitance,
}

impl Capacitor {
    /// Creates a capacitor; fails unless `capacitance_f` is positive.
    pub fn new(capacitance_f: Scalar) -> Result<Self> {
        Ok(Self {
            capacitance: Capacitance::new(ensure_positive("C", capacitance_f)?),
        })
    }

    /// Returns the capacitance magnitude in farads.
    #[must_use]
    pub fn capacitance(&self) -> Scalar {
        self.capacitance.value()
    }

    /// `I = C·dV/dt`.
    #[must_use]
    pub fn current_from_dv_dt(&self, dv_dt: Scalar) -> Scalar {
        self.capacitance() * dv_dt
    }

    /// `dV/dt = I/C`, the capacitor's state equation.
    #[must_use]
    pub fn dv_dt_from_current(&self, current: Scalar) -> Scalar {
        current / self.capacitance()
    }

    /// Stored charge `Q = C·V` in coulombs.
    #[must_use]
    pub fn charge(&self, voltage: Scalar) -> Scalar {
        self.capacitance() * voltage
    }

    /// Stored energy `½·C·V²` in joules.
    #[must_use]
    pub fn energy(&self, voltage: Scalar) -> Scalar {
        0.5 * self.capacitance() * voltage * voltage
    }
}

impl Component for Capacitor {
    /// `Z = 1/(jωC) = -j/(ωC)`; infinite at DC, reported as a domain error.
    fn impedance(&self, omega: Scalar) -> Result<Complex<Scalar>> {
        if omega == 0.0 {
            return Err(CircuitError::DomainUndefined(
                "capacitor impedance at ω = 0",
            ));
        }
        Ok(Complex::new(0.0, -1.0 / (omega * self.capacitance())))
    }

    fn parameter(&self) -> Scalar {
        self.capacitance()
    }
}

/// Lumped inductor model (ideal). Its current is a circuit state variable.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Inductor {
    inductance: Inductance,
}

impl Inductor {
    /// Creates an inductor; fails unless `inductance_h` is positive.
    pub fn new(inductance_h: Scalar) -> Result<Self> {
        Ok(Self {
            inductance: Inductance::new(ensure_positive("L", inductance_h)?),
        })
    }

    /// Returns the inductance magnitude in henries.
    #[must_use]
    pub fn inductance(&self) -> Scalar {
        self.inductance.value()
    }

    /// `V = L·dI/dt`.
    #[must_use]
    pub fn voltage_from_di_dt(&self, di_dt: Scalar) -> Scalar {
        self.inductance() * di_dt
    }

    /// `dI/dt = V/L`, the inductor's state equation.
    #[must_use]
    pub fn di_dt_from_voltage(&self, voltage: Scalar) -> Scalar {
        voltage / self.inductance()
    }

    /// Flux linkage `λ = L·I` in weber-turns.
    #[must_use]
    pub fn flux_linkage(&self, current: Scalar) -> Scalar {
        self.inductance() * current
    }

    /// Stored energy `½·L·I²` in joules.
    #[must_use]
    pub fn energy(&self, current: Scalar) -> Scalar {
        0.5 * self.inductance() * current * current
    }
}

impl Component for Inductor {
    fn impedance(&self, omega: Scalar) -> Result<Complex<Scalar>> {
        Ok(Complex::new(0.0, omega * self.inductance()))
    }

    fn parameter(&self) -> Scalar {
        self.inductance()
    }
}
