//! Source, nonlinear device and capacitor in series.
//!
//! KVL gives the device voltage `v_nl = vs(t) − vC`, and the device current charges the
//! capacitor: `dvC/dt = i(vs − vC)/C`. There is no closed-form reference and no step-size
//! guard; a step too coarse for the device's slope can diverge.

use crate::circuits::component::Capacitor;
use crate::circuits::device::NonlinearDevice;
use crate::errors::{ensure_positive, Result};
use crate::math::Scalar;
use crate::sources::{Sinusoid, Step, Waveform};

use super::{closed_grid, Trace};

/// Output of [`NonlinearRcSolver::solve`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NonlinearRcTrace {
    /// Sample times in seconds.
    pub time: Vec<Scalar>,
    /// Source voltage at each sample.
    pub source: Vec<Scalar>,
    /// Capacitor voltage.
    pub voltage: Vec<Scalar>,
    /// Device current at each sample.
    pub device_current: Vec<Scalar>,
}

impl Trace for NonlinearRcTrace {
    fn time(&self) -> &[Scalar] {
        &self.time
    }

    fn source(&self) -> &[Scalar] {
        &self.source
    }
}

/// Forward Euler integrator for a capacitor charged through a nonlinear device.
#[derive(Debug, Clone, PartialEq)]
pub struct NonlinearRcSolver<D> {
    capacitor: Capacitor,
    dt: Scalar,
    device: D,
}

impl<D: NonlinearDevice> NonlinearRcSolver<D> {
    /// Creates a solver; fails unless `capacitance` and `dt` are positive.
    pub fn new(capacitance: Scalar, dt: Scalar, device: D) -> Result<Self> {
        Ok(Self {
            capacitor: Capacitor::new(capacitance)?,
            dt: ensure_positive("dt", dt)?,
            device,
        })
    }

    /// Integration step in seconds.
    #[must_use]
    pub fn dt(&self) -> Scalar {
        self.dt
    }

    /// The bound device.
    #[must_use]
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The capacitor.
    #[must_use]
    pub fn capacitor(&self) -> &Capacitor {
        &self.capacitor
    }

    fn device_current(&self, vs: Scalar, vc: Scalar) -> Scalar {
        self.device.current(vs - vc)
    }

    /// Integrates from `vC(0) = vc0` to `t_end` under an arbitrary source.
    pub fn solve<S>(&self, source: &S, t_end: Scalar, vc0: Scalar) -> Result<NonlinearRcTrace>
    where
        S: Waveform + ?Sized,
    {
        let time = closed_grid(t_end, self.dt)?;
        let _span =
            tracing::debug_span!("nonlinear_rc_solve", t_end, dt = self.dt, samples = time.len())
                .entered();

        let n = time.len();
        let mut voltage = Vec::with_capacity(n);
        let mut device_current = Vec::with_capacity(n);
        let mut vc = vc0;
        voltage.push(vc);
        for &t in time.iter().take(n - 1) {
            let i = self.device_current(source.value_at(t), vc);
            device_current.push(i);
            vc += self.dt * self.capacitor.dv_dt_from_current(i);
            voltage.push(vc);
        }
        // Closing sample so every sequence has one entry per grid point.
        device_current.push(self.device_current(source.value_at(t_end), vc));

        Ok(NonlinearRcTrace {
            source: source.sample(&time),
            time,
            voltage,
            device_current,
        })
    }

    /// Constant drive `vs = A`.
    pub fn solve_step(&self, amplitude: Scalar, t_end: Scalar, vc0: Scalar) -> Result<NonlinearRcTrace> {
        self.solve(&Step { amplitude }, t_end, vc0)
    }

    /// Sinusoidal drive `vs = A·sin(ωt)`. A nonlinear device distorts the response.
    pub fn solve_sinusoid(
        &self,
        amplitude: Scalar,
        omega: Scalar,
        t_end: Scalar,
        vc0: Scalar,
    ) -> Result<NonlinearRcTrace> {
        self.solve(&Sinusoid::new(amplitude, omega), t_end, vc0)
    }
}
