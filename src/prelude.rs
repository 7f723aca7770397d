//! Convenience re-exports for building transient experiments.

pub use crate::circuits::{
    analysis::{impedance_sweep, iv_curve, FrequencyPoint, IvCurve},
    component::{Capacitor, Component, Inductor, Resistor},
    device::{NonlinearDevice, PiecewiseDiode, QuadraticDevice},
    element::{Element, ElementKind},
};
pub use crate::constants::{angular_frequency, hertz, period};
pub use crate::errors::{CircuitError, Result};
pub use crate::math::Scalar;
pub use crate::simulation::{
    CircuitSpec, DeviceSpec, SimulationConfig, SimulationError, SimulationOutput,
};
pub use crate::solvers::{
    CircuitParams, Damping, DiodeRcSolver, DiodeRcTrace, FidelityWarning, LinearRcSolver,
    NonlinearRcSolver, NonlinearRcTrace, RcTrace, RlcSolver, RlcTrace, Trace,
};
pub use crate::sources::{Ramp, Sinusoid, Source, SourceKind, SourceParams, Step, Waveform};
pub use crate::sweep::{linspace, max_abs_error};
pub use crate::units::{Capacitance, Inductance, Quantity, Resistance, Unit};
