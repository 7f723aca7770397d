//! Integration tests for element laws and static analysis.

use approx::assert_relative_eq;
use circuit_dynamics::prelude::*;

// ── Component Laws ──────────────────────────────────────────────────

#[test]
fn test_parameter_accessors_round_trip() {
    for r in [1e-3, 1.0, 4.7e3, 1e9] {
        assert_eq!(Resistor::new(r).expect("positive").parameter(), r);
    }
    let c = Capacitor::new(2.2e-6).expect("positive");
    for v in [-5.0, 0.0, 1.5, 1e3] {
        assert_eq!(c.charge(v), 2.2e-6 * v);
    }
}

#[test]
fn test_quadratic_device_is_even_and_non_negative() {
    let device = QuadraticDevice::default();
    for v in linspace(-20.0, 20.0, 401) {
        assert_eq!(device.current(v), device.current(-v));
        assert!(device.current(v) >= 0.0);
    }
}

#[test]
fn test_piecewise_diode_is_continuous_at_knees() {
    let diode = PiecewiseDiode::new();
    let eps = 1e-9;
    assert_relative_eq!(diode.current(-eps), 0.0, epsilon = 1e-12);
    assert_relative_eq!(diode.current(eps), 0.0, epsilon = 1e-12);
    assert_relative_eq!(diode.current(3.0 - eps), 2e-3, epsilon = 1e-12);
    assert_relative_eq!(diode.current(3.0 + eps), 2e-3, epsilon = 1e-12);
    assert_relative_eq!(diode.current(3.0), 2e-3, epsilon = 1e-15);
}

#[test]
fn test_invalid_components_are_rejected() {
    assert!(matches!(
        Resistor::new(0.0),
        Err(CircuitError::InvalidParameter { .. })
    ));
    assert!(Capacitor::new(-1e-6).is_err());
    assert!(Inductor::new(Scalar::NAN).is_err());
    assert!(QuadraticDevice::new(Scalar::INFINITY).is_err());
}

// ── Static Analysis ─────────────────────────────────────────────────

#[test]
fn test_iv_curve_of_resistor_is_ohmic() {
    let element = Element::from(Resistor::new(100.0).expect("positive"));
    let curve = iv_curve(&element, -5.0, 5.0, 11).expect("resistor has a current law");
    assert_eq!(curve.len(), 11);
    for (v, i) in curve.voltage.iter().zip(&curve.current) {
        assert_relative_eq!(*i, v / 100.0, epsilon = 1e-15);
    }
}

#[test]
fn test_capacitor_has_no_static_current_law() {
    let element = Element::from(Capacitor::new(1e-6).expect("positive"));
    assert!(matches!(
        iv_curve(&element, 0.0, 1.0, 5),
        Err(CircuitError::MissingCapability { .. })
    ));
}

#[test]
fn test_impedance_sweep_of_inductor_grows_linearly() {
    let element = Element::from(Inductor::new(1e-3).expect("positive"));
    let omegas = linspace(100.0, 1000.0, 10);
    let points = impedance_sweep(&element, omegas.iter().copied()).expect("inductor has impedance");
    assert_eq!(points.len(), 10);
    for p in &points {
        assert_relative_eq!(p.impedance.re, 0.0);
        assert_relative_eq!(p.impedance.im, p.omega * 1e-3, epsilon = 1e-12);
    }

    let device = Element::from(PiecewiseDiode::new());
    assert!(impedance_sweep(&device, [1.0]).is_err());
}
