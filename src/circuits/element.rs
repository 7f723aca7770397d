//! Tagged union over every supported two-terminal element.
//!
//! Linear elements carry an impedance; nonlinear devices carry a current law. Callers
//! match on the capability they need instead of probing a trait object.

use std::fmt;

use num_complex::Complex;

use crate::errors::{CircuitError, Result};
use crate::math::Scalar;

use super::component::{Capacitor, Component, Inductor, Resistor};
use super::device::{NonlinearDevice, PiecewiseDiode, QuadraticDevice};

/// Discriminant of [`Element`], used in diagnostics.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Linear resistor.
    Resistor,
    /// Linear capacitor.
    Capacitor,
    /// Linear inductor.
    Inductor,
    /// Square-law device.
    QuadraticDevice,
    /// Three-region diode-like device.
    PiecewiseDiode,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Resistor => "resistor",
            Self::Capacitor => "capacitor",
            Self::Inductor => "inductor",
            Self::QuadraticDevice => "quadratic device",
            Self::PiecewiseDiode => "piecewise diode",
        };
        f.write_str(name)
    }
}

/// Any supported element.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Element {
    /// Linear resistor.
    Resistor(Resistor),
    /// Linear capacitor.
    Capacitor(Capacitor),
    /// Linear inductor.
    Inductor(Inductor),
    /// Square-law device.
    QuadraticDevice(QuadraticDevice),
    /// Three-region diode-like device.
    PiecewiseDiode(PiecewiseDiode),
}

impl Element {
    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Resistor(_) => ElementKind::Resistor,
            Self::Capacitor(_) => ElementKind::Capacitor,
            Self::Inductor(_) => ElementKind::Inductor,
            Self::QuadraticDevice(_) => ElementKind::QuadraticDevice,
            Self::PiecewiseDiode(_) => ElementKind::PiecewiseDiode,
        }
    }

    /// The impedance-bearing view, present for R, L and C.
    #[must_use]
    pub fn as_linear(&self) -> Option<&dyn Component> {
        match self {
            Self::Resistor(r) => Some(r),
            Self::Capacitor(c) => Some(c),
            Self::Inductor(l) => Some(l),
            Self::QuadraticDevice(_) | Self::PiecewiseDiode(_) => None,
        }
    }

    /// The current-law view, present for the nonlinear devices.
    #[must_use]
    pub fn as_device(&self) -> Option<&dyn NonlinearDevice> {
        match self {
            Self::QuadraticDevice(d) => Some(d),
            Self::PiecewiseDiode(d) => Some(d),
            Self::Resistor(_) | Self::Capacitor(_) | Self::Inductor(_) => None,
        }
    }

    /// Impedance at `omega`; only linear elements have one.
    pub fn impedance(&self, omega: Scalar) -> Result<Complex<Scalar>> {
        self.as_linear()
            .ok_or(CircuitError::MissingCapability {
                kind: self.kind(),
                capability: "impedance",
            })?
            .impedance(omega)
    }

    /// Static current for a terminal voltage.
    ///
    /// Resistors answer through Ohm's law; capacitors and inductors relate current to a
    /// rate of change and have no static law.
    pub fn current(&self, voltage: Scalar) -> Result<Scalar> {
        match self {
            Self::Resistor(r) => Ok(r.current(voltage)),
            Self::QuadraticDevice(d) => Ok(d.current(voltage)),
            Self::PiecewiseDiode(d) => Ok(d.current(voltage)),
            Self::Capacitor(_) | Self::Inductor(_) => Err(CircuitError::MissingCapability {
                kind: self.kind(),
                capability: "static current law",
            }),
        }
    }
}

impl From<Resistor> for Element {
    fn from(value: Resistor) -> Self {
        Self::Resistor(value)
    }
}

impl From<Capacitor> for Element {
    fn from(value: Capacitor) -> Self {
        Self::Capacitor(value)
    }
}

impl From<Inductor> for Element {
    fn from(value: Inductor) -> Self {
        Self::Inductor(value)
    }
}

impl From<QuadraticDevice> for Element {
    fn from(value: QuadraticDevice) -> Self {
        Self::QuadraticDevice(value)
    }
}

impl From<PiecewiseDiode> for Element {
    fn from(value: PiecewiseDiode) -> Self {
        Self::PiecewiseDiode(value)
    }
}
