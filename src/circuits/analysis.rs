use num_complex::Complex;

use crate::errors::{CircuitError, Result};
use crate::math::Scalar;
use crate::sweep::linspace;

use super::element::Element;

/// Result of evaluating an element at a single angular frequency.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyPoint {
    /// Angular frequency ω in rad/s.
    pub omega: Scalar,
    /// Element impedance at `omega`.
    pub impedance: Complex<Scalar>,
}

/// Evaluates the impedance of a linear element across the provided angular frequencies.
///
/// Fails on the first frequency where the impedance is undefined (a capacitor at DC), or
/// immediately when the element has no impedance.
pub fn impedance_sweep<I>(element: &Element, omegas: I) -> Result<Vec<FrequencyPoint>>
where
    I: IntoIterator<Item = Scalar>,
{
    omegas
        .into_iter()
        .map(|w| {
            Ok(FrequencyPoint {
                omega: w,
                impedance: element.impedance(w)?,
            })
        })
        .collect()
}

/// Sampled current-voltage characteristic.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IvCurve {
    /// Voltage samples in volts.
    pub voltage: Vec<Scalar>,
    /// Current at each voltage sample, in amperes.
    pub current: Vec<Scalar>,
}

impl IvCurve {
    /// Number of samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    /// True if no samples recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.voltage.is_empty()
    }
}

/// Samples the static current law of `element` at `points` voltages in `[v_min, v_max]`.
///
/// Only resistors and nonlinear devices have a static law; capacitors and inductors fail
/// with [`CircuitError::MissingCapability`].
pub fn iv_curve(element: &Element, v_min: Scalar, v_max: Scalar, points: usize) -> Result<IvCurve> {
    if !(v_min.is_finite() && v_max.is_finite()) || v_max < v_min {
        return Err(CircuitError::InvalidParameter {
            name: "v_max - v_min",
            value: v_max - v_min,
        });
    }
    if points == 0 {
        return Err(CircuitError::InvalidParameter {
            name: "points",
            value: 0.0,
        });
    }

    let voltage = linspace(v_min, v_max, points);
    let current = voltage
        .iter()
        .map(|&v| element.current(v))
        .collect::<Result<Vec<_>>>()?;
    Ok(IvCurve { voltage, current })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::circuits::component::{Capacitor, Inductor, Resistor};
    use crate::circuits::device::PiecewiseDiode;

    #[test]
    fn impedance_sweep_returns_points() {
        let l: Element = Inductor::new(1e-3).unwrap().into();
        let omegas = linspace(10.0, 1.0e4, 4);
        let pts = impedance_sweep(&l, omegas.iter().copied()).unwrap();
        assert_eq!(pts.len(), 4);
        let mags: Vec<Scalar> = pts.iter().map(|p| p.impedance.norm()).collect();
        assert!(mags.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn impedance_sweep_stops_at_undefined_point() {
        let c: Element = Capacitor::new(1e-6).unwrap().into();
        assert!(impedance_sweep(&c, [1.0, 0.0, 2.0]).is_err());
        assert_eq!(impedance_sweep(&c, [1.0, 2.0]).unwrap().len(), 2);
    }

    #[test]
    fn resistor_iv_curve_is_a_line() {
        let r: Element = Resistor::new(1e3).unwrap().into();
        let curve = iv_curve(&r, -5.0, 5.0, 11).unwrap();
        assert_eq!(curve.len(), 11);
        for (v, i) in curve.voltage.iter().zip(&curve.current) {
            assert_relative_eq!(*i, v / 1e3, epsilon = 1e-15);
        }
    }

    #[test]
    fn diode_iv_curve_hits_breakpoints() {
        let d: Element = PiecewiseDiode::new().into();
        let curve = iv_curve(&d, -3.0, 6.0, 10).unwrap();
        assert_eq!(curve.voltage[3], 0.0);
        assert_eq!(curve.current[3], 0.0);
        assert_relative_eq!(curve.current[6], 2.0e-3, epsilon = 1e-15);
        assert_relative_eq!(curve.current[9], 11.0e-3, epsilon = 1e-15);
    }

    #[test]
    fn iv_curve_rejects_reactive_elements_and_bad_ranges() {
        let c: Element = Capacitor::new(1e-6).unwrap().into();
        assert!(matches!(
            iv_curve(&c, 0.0, 1.0, 3),
            Err(CircuitError::MissingCapability { .. })
        ));
        let r: Element = Resistor::new(1.0).unwrap().into();
        assert!(iv_curve(&r, 1.0, 0.0, 3).is_err());
        assert!(matches!(
            iv_curve(&r, 0.0, 1.0, 0),
            Err(CircuitError::InvalidParameter { name: "points", .. })
        ));
    }
}
