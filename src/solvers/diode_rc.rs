//! Half-wave style rectifier: a diode feeding a capacitor with a resistive load.
//!
//! The output node sums two independent branch laws before the Euler update:
//! `i_C = i_diode(vs − vo) − vo/R_load`, `dvo/dt = i_C/C`. The drive is fixed at
//! `vs(t) = 10·sin(10t)`.

use crate::circuits::component::{Capacitor, Resistor};
use crate::circuits::device::{NonlinearDevice, PiecewiseDiode};
use crate::errors::{ensure_positive, Result};
use crate::math::Scalar;
use crate::sources::{Sinusoid, Waveform};

use super::{half_open_grid, Trace};

/// Fixed drive of the rectifier circuit.
pub const DRIVE: Sinusoid = Sinusoid::new(10.0, 10.0);

/// Output of [`DiodeRcSolver::simulate`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DiodeRcTrace {
    /// Sample times in seconds.
    pub time: Vec<Scalar>,
    /// Drive voltage at each sample.
    pub source: Vec<Scalar>,
    /// Output (capacitor) voltage.
    pub output_voltage: Vec<Scalar>,
}

impl Trace for DiodeRcTrace {
    fn time(&self) -> &[Scalar] {
        &self.time
    }

    fn source(&self) -> &[Scalar] {
        &self.source
    }
}

/// Forward Euler integrator for the diode-fed RC load.
#[derive(Debug, Clone, PartialEq)]
pub struct DiodeRcSolver<D = PiecewiseDiode> {
    load: Resistor,
    capacitor: Capacitor,
    dt: Scalar,
    diode: D,
}

impl<D: NonlinearDevice> DiodeRcSolver<D> {
    /// Creates a solver; fails unless the load, capacitance and dt are positive.
    pub fn new(load_resistance: Scalar, capacitance: Scalar, dt: Scalar, diode: D) -> Result<Self> {
        Ok(Self {
            load: Resistor::new(load_resistance)?,
            capacitor: Capacitor::new(capacitance)?,
            dt: ensure_positive("dt", dt)?,
            diode,
        })
    }

    /// Integration step in seconds.
    #[must_use]
    pub fn dt(&self) -> Scalar {
        self.dt
    }

    /// Net current into the capacitor by KCL at the output node.
    fn capacitor_current(&self, vs: Scalar, vo: Scalar) -> Scalar {
        self.diode.current(vs - vo) - self.load.current(vo)
    }

    /// Runs from `vo(0) = v0` over `t_k = k·dt < t_end`.
    ///
    /// # Errors
    /// [`crate::CircuitError::InvalidParameter`] unless `t_end` is finite and positive.
    pub fn simulate(&self, t_end: Scalar, v0: Scalar) -> Result<DiodeRcTrace> {
        let time = half_open_grid(t_end, self.dt)?;
        let _span =
            tracing::debug_span!("diode_rc_simulate", t_end, dt = self.dt, samples = time.len())
                .entered();

        let source = DRIVE.sample(&time);
        let mut output_voltage = Vec::with_capacity(time.len());
        let mut vo = v0;
        output_voltage.push(vo);
        for &vs in source.iter().take(time.len().saturating_sub(1)) {
            let i_cap = self.capacitor_current(vs, vo);
            vo += self.dt * self.capacitor.dv_dt_from_current(i_cap);
            output_voltage.push(vo);
        }

        Ok(DiodeRcTrace {
            time,
            source,
            output_voltage,
        })
    }
}

impl DiodeRcSolver<PiecewiseDiode> {
    /// Solver bound to the reference piecewise diode.
    pub fn with_piecewise_diode(load_resistance: Scalar, capacitance: Scalar, dt: Scalar) -> Result<Self> {
        Self::new(load_resistance, capacitance, dt, PiecewiseDiode::new())
    }
}
