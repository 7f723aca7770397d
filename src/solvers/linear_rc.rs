//! Series R-C driven by a voltage source, output across the capacitor.
//!
//! With `τ = RC` the capacitor voltage obeys `dx/dt = −x/τ + u(t)/τ`. Forward Euler on
//! this equation is stable only for `dt < 2τ`, which construction enforces.

use crate::circuits::component::{Capacitor, Resistor};
use crate::constants::{RC_FIDELITY_FACTOR, RC_STABILITY_FACTOR};
use crate::errors::{ensure_positive, CircuitError, Result};
use crate::math::Scalar;
use crate::sources::{Ramp, Sinusoid, Step, Waveform};
use crate::sweep::max_abs_error;

use super::analytic::{rc_ramp_response, rc_sinusoid_steady_state, rc_step_response};
use super::{closed_grid, FidelityWarning, Trace};

/// Output of [`LinearRcSolver::solve`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RcTrace {
    /// Sample times in seconds.
    pub time: Vec<Scalar>,
    /// Source voltage at each sample.
    pub source: Vec<Scalar>,
    /// Numerical capacitor voltage.
    pub voltage: Vec<Scalar>,
    /// Reference solution at each sample, when one was supplied.
    pub analytic: Option<Vec<Scalar>>,
}

impl RcTrace {
    /// Largest deviation of the numerical voltage from the reference.
    #[must_use]
    pub fn max_error(&self) -> Option<Scalar> {
        max_abs_error(&self.voltage, self.analytic.as_deref()?)
    }
}

impl Trace for RcTrace {
    fn time(&self) -> &[Scalar] {
        &self.time
    }

    fn source(&self) -> &[Scalar] {
        &self.source
    }
}

/// Forward Euler integrator for the series RC circuit.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRcSolver {
    resistor: Resistor,
    capacitor: Capacitor,
    dt: Scalar,
    tau: Scalar,
    warning: Option<FidelityWarning>,
}

impl LinearRcSolver {
    /// Creates a solver for `R` ohms, `C` farads and step `dt` seconds.
    ///
    /// # Errors
    /// [`CircuitError::InvalidParameter`] for non-positive R, C or dt and
    /// [`CircuitError::Unstable`] when `dt ≥ 2τ`. A step above `0.05·τ` is accepted and
    /// reported through [`Self::fidelity_warning`].
    pub fn new(resistance: Scalar, capacitance: Scalar, dt: Scalar) -> Result<Self> {
        Self::from_components(Resistor::new(resistance)?, Capacitor::new(capacitance)?, dt)
    }

    /// Creates a solver from already validated components.
    pub fn from_components(resistor: Resistor, capacitor: Capacitor, dt: Scalar) -> Result<Self> {
        let dt = ensure_positive("dt", dt)?;
        let tau = resistor.resistance() * capacitor.capacitance();

        let limit = RC_STABILITY_FACTOR * tau;
        if dt >= limit {
            return Err(CircuitError::Unstable { dt, limit });
        }

        let warning = (dt > RC_FIDELITY_FACTOR * tau)
            .then_some(FidelityWarning::CoarseRcStep { dt, tau });
        if let Some(w) = warning {
            tracing::warn!(dt, tau, recommended = w.recommended_dt(), "{w}");
        }

        Ok(Self {
            resistor,
            capacitor,
            dt,
            tau,
            warning,
        })
    }

    /// Time constant `τ = RC` in seconds.
    #[must_use]
    pub fn time_constant(&self) -> Scalar {
        self.tau
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

    /// The capacitor.
    #[must_use]
    pub fn capacitor(&self) -> &Capacitor {
        &self.capacitor
    }

    /// `dx/dt` for capacitor voltage `x` and source value `u`.
    ///
    /// The series current `(u − x)/R` charges the capacitor.
    fn derivative(&self, x: Scalar, u: Scalar) -> Scalar {
        self.capacitor
            .dv_dt_from_current(self.resistor.current(u - x))
    }

    /// Integrates from `x(0) = x0` to `t_end` under an arbitrary source.
    ///
    /// When `analytic` is given it is evaluated at every sample for comparison.
    pub fn solve<S>(
        &self,
        source: &S,
        t_end: Scalar,
        x0: Scalar,
        analytic: Option<&dyn Fn(Scalar) -> Scalar>,
    ) -> Result<RcTrace>
    where
        S: Waveform + ?Sized,
    {
        let time = closed_grid(t_end, self.dt)?;
        let _span =
            tracing::debug_span!("linear_rc_solve", t_end, dt = self.dt, samples = time.len())
                .entered();

        let mut voltage = Vec::with_capacity(time.len());
        let mut x = x0;
        voltage.push(x);
        for &t in time.iter().take(time.len() - 1) {
            x += self.dt * self.derivative(x, source.value_at(t));
            voltage.push(x);
        }

        let analytic = analytic.map(|f| time.iter().map(|&t| f(t)).collect());
        Ok(RcTrace {
            source: source.sample(&time),
            time,
            voltage,
            analytic,
        })
    }

    /// Step input `A·u(t)` with reference `A + (x0 − A)·e^{−t/τ}`.
    pub fn solve_step(&self, amplitude: Scalar, t_end: Scalar, x0: Scalar) -> Result<RcTrace> {
        let tau = self.tau;
        let reference = move |t| rc_step_response(amplitude, x0, tau, t);
        self.solve(&Step { amplitude }, t_end, x0, Some(&reference))
    }

    /// Ramp input `A·t·u(t)` with reference `A(t − τ) + (x0 + Aτ)·e^{−t/τ}`.
    pub fn solve_ramp(&self, slope: Scalar, t_end: Scalar, x0: Scalar) -> Result<RcTrace> {
        let tau = self.tau;
        let reference = move |t| rc_ramp_response(slope, x0, tau, t);
        self.solve(&Ramp { slope }, t_end, x0, Some(&reference))
    }

    /// Sinusoidal input `A·sin(ωt)`.
    ///
    /// The reference, attached only when `steady_state_only` is set, is the steady-state
    /// response; it disagrees with the simulation until the transient has decayed.
    pub fn solve_sinusoid(
        &self,
        amplitude: Scalar,
        omega: Scalar,
        t_end: Scalar,
        x0: Scalar,
        steady_state_only: bool,
    ) -> Result<RcTrace> {
        let tau = self.tau;
        let reference = move |t| rc_sinusoid_steady_state(amplitude, omega, tau, t);
        let analytic: Option<&dyn Fn(Scalar) -> Scalar> = if steady_state_only {
            Some(&reference)
        } else {
            None
        };
        self.solve(&Sinusoid::new(amplitude, omega), t_end, x0, analytic)
    }
}
