//! Circuit element models: linear components, nonlinear devices and their tagged union.

/// Static characterisation helpers (I-V curves, impedance sweeps).
pub mod analysis;
/// Linear component definitions and the impedance trait.
pub mod component;
/// Nonlinear devices defined by a current law.
pub mod device;
/// Sum type over all element variants.
pub mod element;

pub use analysis::{impedance_sweep, iv_curve, FrequencyPoint, IvCurve};
pub use component::{Capacitor, Component, Inductor, Resistor};
pub use device::{NonlinearDevice, PiecewiseDiode, QuadraticDevice};
pub use element::{Element, ElementKind};
