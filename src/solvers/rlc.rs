//! Series R-L-C driven by a voltage source.
//!
//! State `x = [vC, iL]ᵀ` with
//!
//! ```text
//! dvC/dt = iL/C
//! diL/dt = (−R·iL − vC + vs(t))/L
//! ```
//!
//! i.e. `dx/dt = A·x + B·vs` with `A = [[0, 1/C], [−1/L, −R/L]]` and `B = [0, 1/L]ᵀ`.
//! Both components are advanced from the same pre-step state.

use std::f64::consts::PI;
use std::fmt;

use crate::circuits::component::{Capacitor, Inductor, Resistor};
use crate::constants::{hertz, RLC_FIDELITY_DIVISOR};
use crate::errors::{ensure_positive, Result};
use crate::math::{Scalar, State2, StateMatrix2};
use crate::sources::Waveform;

use super::{closed_grid, FidelityWarning, Trace};

/// Damping regime of a second-order circuit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Damping {
    /// `ζ < 1`: decaying oscillation.
    Underdamped,
    /// `ζ = 1` exactly.
    CriticallyDamped,
    /// `ζ > 1`: no oscillation.
    Overdamped,
}

impl Damping {
    /// Classifies a damping ratio by strict comparison with 1.
    #[must_use]
    pub fn classify(zeta: Scalar) -> Self {
        if zeta < 1.0 {
            Self::Underdamped
        } else if zeta == 1.0 {
            Self::CriticallyDamped
        } else {
            Self::Overdamped
        }
    }
}

impl fmt::Display for Damping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Underdamped => "underdamped",
            Self::CriticallyDamped => "critically damped",
            Self::Overdamped => "overdamped",
        })
    }
}

/// Ringing frequency of an underdamped circuit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DampedOscillation {
    /// `ω_d = ω₀·√(1 − ζ²)` in rad/s.
    pub omega_d: Scalar,
    /// `f_d = ω_d/2π` in Hz.
    pub f_d: Scalar,
}

/// Derived characteristics of a series RLC circuit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitParams {
    /// Natural angular frequency `ω₀ = 1/√(LC)` in rad/s.
    pub omega_0: Scalar,
    /// Natural frequency `ω₀/2π` in Hz.
    pub f_0: Scalar,
    /// Natural period `T₀ = 2π/ω₀` in seconds.
    pub period: Scalar,
    /// Damping ratio `ζ = (R/2)·√(C/L)`.
    pub zeta: Scalar,
    /// Regime implied by `zeta`.
    pub damping: Damping,
    /// Present only when underdamped.
    pub damped: Option<DampedOscillation>,
}

impl CircuitParams {
    fn new(resistance: Scalar, inductance: Scalar, capacitance: Scalar) -> Self {
        let omega_0 = 1.0 / (inductance * capacitance).sqrt();
        let zeta = (resistance / 2.0) * (capacitance / inductance).sqrt();
        let damping = Damping::classify(zeta);
        let damped = (damping == Damping::Underdamped).then(|| {
            let omega_d = omega_0 * (1.0 - zeta * zeta).sqrt();
            DampedOscillation {
                omega_d,
                f_d: hertz(omega_d),
            }
        });
        Self {
            omega_0,
            f_0: hertz(omega_0),
            period: 2.0 * PI / omega_0,
            zeta,
            damping,
            damped,
        }
    }
}

/// Output of [`RlcSolver::solve`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RlcTrace {
    /// Sample times in seconds.
    pub time: Vec<Scalar>,
    /// Source voltage at each sample.
    pub source: Vec<Scalar>,
    /// Capacitor voltage.
    pub capacitor_voltage: Vec<Scalar>,
    /// Inductor (loop) current.
    pub inductor_current: Vec<Scalar>,
}

impl Trace for RlcTrace {
    fn time(&self) -> &[Scalar] {
        &self.time
    }

    fn source(&self) -> &[Scalar] {
        &self.source
    }
}

/// Forward Euler integrator for the series RLC circuit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RlcSolver {
    resistor: Resistor,
    inductor: Inductor,
    capacitor: Capacitor,
    dt: Scalar,
    params: CircuitParams,
    a: StateMatrix2,
    b: State2,
    warning: Option<FidelityWarning>,
}

impl RlcSolver {
    /// Creates a solver; fails unless R, L, C and dt are positive.
    ///
    /// A step above `T₀/20` is accepted and reported through [`Self::fidelity_warning`].
    pub fn new(resistance: Scalar, inductance: Scalar, capacitance: Scalar, dt: Scalar) -> Result<Self> {
        let resistor = Resistor::new(resistance)?;
        let inductor = Inductor::new(inductance)?;
        let capacitor = Capacitor::new(capacitance)?;
        let dt = ensure_positive("dt", dt)?;

        let params = CircuitParams::new(resistance, inductance, capacitance);
        let warning = (dt > params.period / RLC_FIDELITY_DIVISOR).then_some(
            FidelityWarning::CoarseRlcStep {
                dt,
                natural_period: params.period,
            },
        );
        if let Some(w) = warning {
            tracing::warn!(dt, period = params.period, recommended = w.recommended_dt(), "{w}");
        }

        let a = StateMatrix2::new(
            0.0,
            1.0 / capacitance,
            -1.0 / inductance,
            -resistance / inductance,
        );
        let b = State2::new(0.0, 1.0 / inductance);

        Ok(Self {
            resistor,
            inductor,
            capacitor,
            dt,
            params,
            a,
            b,
            warning,
        })
    }

    /// Natural frequency, period, damping ratio and regime.
    #[must_use]
    pub fn circuit_params(&self) -> CircuitParams {
        self.params
    }

    /// State matrix `A` of `dx/dt = A·x + B·vs`.
    #[must_use]
    pub fn state_matrix(&self) -> StateMatrix2 {
        self.a
    }

    /// Input vector `B` of `dx/dt = A·x + B·vs`.
    #[must_use]
    pub fn input_vector(&self) -> State2 {
        self.b
    }

    /// Integration step in seconds.
    #[must_use]
    pub fn dt(&self) -> Scalar {
        self.dt
    }

    /// Advisory raised at construction, if any.
    #[must_use]
    pub fn fidelity_warning(&self) -> Option<FidelityWarning> {
        self.warning
    }

    /// The series resistor.
    #[must_use]
    pub fn resistor(&self) -> &Resistor {
        &self.resistor
    }

    /// Energy `½C·vC² + ½L·iL²` held by the reactive elements.
    #[must_use]
    pub fn stored_energy(&self, capacitor_voltage: Scalar, inductor_current: Scalar) -> Scalar {
        self.capacitor.energy(capacitor_voltage) + self.inductor.energy(inductor_current)
    }

    /// Stored energy at every sample of a trace.
    #[must_use]
    pub fn energy_series(&self, trace: &RlcTrace) -> Vec<Scalar> {
        trace
            .capacitor_voltage
            .iter()
            .zip(&trace.inductor_current)
            .map(|(&v, &i)| self.stored_energy(v, i))
            .collect()
    }

    /// Integrates from `(vC, iL) = (vc0, il0)` to `t_end` under an arbitrary source.
    pub fn solve<S>(&self, source: &S, t_end: Scalar, vc0: Scalar, il0: Scalar) -> Result<RlcTrace>
    where
        S: Waveform + ?Sized,
    {
        let time = closed_grid(t_end, self.dt)?;
        let _span = tracing::debug_span!("rlc_solve", t_end, dt = self.dt, samples = time.len())
            .entered();

        let n = time.len();
        let mut capacitor_voltage = Vec::with_capacity(n);
        let mut inductor_current = Vec::with_capacity(n);
        let mut x = State2::new(vc0, il0);
        capacitor_voltage.push(x[0]);
        inductor_current.push(x[1]);
        for &t in time.iter().take(n - 1) {
            let dx = self.a * x + self.b * source.value_at(t);
            x += dx * self.dt;
            capacitor_voltage.push(x[0]);
            inductor_current.push(x[1]);
        }

        Ok(RlcTrace {
            source: source.sample(&time),
            time,
            capacitor_voltage,
            inductor_current,
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::errors::CircuitError;
    use crate::sources::Step;

    fn reference_solver(dt: Scalar) -> RlcSolver {
        RlcSolver::new(10.0, 0.01, 1e-4, dt).unwrap()
    }

    #[test]
    fn underdamped_parameters() {
        let p = reference_solver(1e-6).circuit_params();
        assert_relative_eq!(p.zeta, 0.5, epsilon = 1e-12);
        assert_eq!(p.damping, Damping::Underdamped);
        assert_relative_eq!(p.omega_0, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(p.period, 2.0 * PI / 1000.0, epsilon = 1e-12);
        assert_relative_eq!(p.f_0, 1000.0 / (2.0 * PI), epsilon = 1e-9);
        let damped = p.damped.unwrap();
        assert_relative_eq!(damped.omega_d, 866.025_403_784, epsilon = 1e-2);
        assert_relative_eq!(damped.f_d, damped.omega_d / (2.0 * PI));
        assert_eq!(p.damping.to_string(), "underdamped");
    }

    #[test]
    fn critical_and_overdamped_classification() {
        let critical = RlcSolver::new(2.0, 1.0, 1.0, 1e-3).unwrap().circuit_params();
        assert_eq!(critical.damping, Damping::CriticallyDamped);
        assert!(critical.damped.is_none());

        let over = RlcSolver::new(100.0, 0.01, 1e-4, 1e-6).unwrap().circuit_params();
        assert_relative_eq!(over.zeta, 5.0, epsilon = 1e-12);
        assert_eq!(over.damping, Damping::Overdamped);
        assert!(over.damped.is_none());
        assert_eq!(Damping::classify(1.0).to_string(), "critically damped");
    }

    #[test]
    fn step_response_overshoots_when_underdamped() {
        let trace = reference_solver(1e-6)
            .solve(&Step { amplitude: 1.0 }, 0.02, 0.0, 0.0)
            .unwrap();
        let peak = trace.capacitor_voltage.iter().copied().fold(0.0, Scalar::max);
        // 1 + exp(−ζπ/√(1 − ζ²)) for ζ = 0.5.
        let expected = 1.0 + (-0.5 * PI / 0.75_f64.sqrt()).exp();
        assert_relative_eq!(peak, expected, epsilon = 1e-2);
    }

    #[test]
    fn overdamped_step_response_rises_monotonically() {
        let solver = RlcSolver::new(100.0, 0.01, 1e-4, 1e-6).unwrap();
        let trace = solver.solve(&Step { amplitude: 1.0 }, 0.02, 0.0, 0.0).unwrap();
        assert!(trace.capacitor_voltage.windows(2).all(|w| w[1] >= w[0]));
        assert!(trace.capacitor_voltage.iter().all(|&v| v < 1.0));
    }

    #[test]
    fn update_reads_pre_step_state() {
        let dt = 1e-6;
        let trace = reference_solver(dt)
            .solve(&|_t: Scalar| 0.0, 2.0 * dt, 1.0, 0.0)
            .unwrap();
        assert_eq!(trace.capacitor_voltage[1], 1.0);
        assert_relative_eq!(trace.inductor_current[1], -dt / 0.01, max_relative = 1e-12);
        assert_relative_eq!(
            trace.capacitor_voltage[2],
            1.0 + dt * trace.inductor_current[1] / 1e-4,
            epsilon = 1e-15
        );
    }

    #[test]
    fn energy_decays_without_source() {
        let dt = 1e-6;
        let (r, l, c) = (10.0, 0.01, 1e-4);
        let solver = RlcSolver::new(r, l, c, dt).unwrap();
        let trace = solver.solve(&|_t: Scalar| 0.0, 0.02, 1.0, 0.0).unwrap();
        let energy = solver.energy_series(&trace);

        // One explicit step changes the energy by −dt·R·i² + dt²·(i²/2C + (R·i + v)²/2L).
        for k in 0..energy.len() - 1 {
            let v = trace.capacitor_voltage[k];
            let i = trace.inductor_current[k];
            let scheme = dt * dt * (i * i / (2.0 * c) + (r * i + v).powi(2) / (2.0 * l));
            assert!(energy[k + 1] <= energy[k] + scheme + 1e-12 * energy[k]);
        }
        let sampled: Vec<Scalar> = energy.iter().step_by(1000).copied().collect();
        assert!(sampled.windows(2).all(|w| w[1] < w[0]));
        assert!(*energy.last().unwrap() < 1e-6 * energy[0]);
    }

    #[test]
    fn fidelity_warning_above_one_twentieth_period() {
        assert!(reference_solver(1e-4).fidelity_warning().is_none());
        let coarse = reference_solver(1e-3);
        let w = coarse.fidelity_warning().unwrap();
        assert_relative_eq!(w.recommended_dt(), 2.0 * PI / 1000.0 / 50.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(matches!(
            RlcSolver::new(0.0, 0.01, 1e-4, 1e-6),
            Err(CircuitError::InvalidParameter { name: "R", .. })
        ));
        assert!(RlcSolver::new(10.0, -0.01, 1e-4, 1e-6).is_err());
        assert!(RlcSolver::new(10.0, 0.01, 0.0, 1e-6).is_err());
        assert!(RlcSolver::new(10.0, 0.01, 1e-4, 0.0).is_err());
    }

    #[test]
    fn state_matrix_matches_circuit() {
        let solver = reference_solver(1e-6);
        let a = solver.state_matrix();
        assert_relative_eq!(a[(0, 1)], 1.0e4, max_relative = 1e-12);
        assert_relative_eq!(a[(1, 0)], -100.0, max_relative = 1e-12);
        assert_relative_eq!(a[(1, 1)], -1000.0, max_relative = 1e-12);
        assert_relative_eq!(solver.input_vector()[1], 100.0, max_relative = 1e-12);
        assert_relative_eq!(solver.stored_energy(1.0, 1.0), 0.5e-4 + 0.5e-2, max_relative = 1e-12);
    }
}
