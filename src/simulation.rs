//! Declarative run descriptions: pick a topology, a source and a time grid, then `run`.

use std::time::Duration;

use crate::circuits::device::{PiecewiseDiode, QuadraticDevice};
use crate::errors::CircuitError;
use crate::math::Scalar;
use crate::solvers::{
    DiodeRcSolver, DiodeRcTrace, LinearRcSolver, NonlinearRcSolver, NonlinearRcTrace, RcTrace,
    RlcSolver, RlcTrace, Trace,
};
use crate::sources::{Source, SourceParams};

/// Nonlinear device placed in series with the capacitor.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DeviceSpec {
    /// `i = k·v²`.
    Quadratic {
        /// Coefficient in A/V².
        k: Scalar,
    },
    /// Three-region diode with knees at 0 V and 3 V.
    PiecewiseDiode,
}

/// Circuit topology and its element values.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "topology", rename_all = "snake_case"))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircuitSpec {
    /// Source, resistor and capacitor in series.
    LinearRc {
        /// Ohms.
        resistance: Scalar,
        /// Farads.
        capacitance: Scalar,
    },
    /// Source, nonlinear device and capacitor in series.
    NonlinearRc {
        /// Farads.
        capacitance: Scalar,
        /// Series device.
        device: DeviceSpec,
    },
    /// Series R-L-C.
    Rlc {
        /// Ohms.
        resistance: Scalar,
        /// Henries.
        inductance: Scalar,
        /// Farads.
        capacitance: Scalar,
    },
    /// Diode-fed capacitor with resistive load and a fixed `10·sin(10t)` drive.
    DiodeRc {
        /// Load ohms.
        load_resistance: Scalar,
        /// Farads.
        capacitance: Scalar,
    },
}

/// Metadata and parameters describing one transient run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Human-readable identifier.
    pub name: String,
    /// Topology to integrate.
    pub circuit: CircuitSpec,
    /// Source tag (`step`, `ramp`, `sine`); must be absent for the diode rectifier.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source: Option<String>,
    /// Values read by the source factory.
    #[cfg_attr(feature = "serde", serde(default))]
    pub source_params: SourceParams,
    /// Integration step in seconds.
    pub time_step: Option<Scalar>,
    /// Horizon in seconds.
    pub duration: Option<Scalar>,
    /// Initial capacitor voltage.
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_voltage: Scalar,
    /// Initial inductor current (RLC only).
    #[cfg_attr(feature = "serde", serde(default))]
    pub initial_current: Scalar,
}

impl SimulationConfig {
    /// Creates a configuration with no source and no time grid yet.
    #[must_use]
    pub fn new(name: impl Into<String>, circuit: CircuitSpec) -> Self {
        Self {
            name: name.into(),
            circuit,
            source: None,
            source_params: SourceParams::default(),
            time_step: None,
            duration: None,
            initial_voltage: 0.0,
            initial_current: 0.0,
        }
    }

    /// Creates a configuration with a time grid taken from `Duration`s.
    #[must_use]
    pub fn time(
        name: impl Into<String>,
        circuit: CircuitSpec,
        duration: Duration,
        time_step: Duration,
    ) -> Self {
        Self::new(name, circuit)
            .with_grid(duration.as_secs_f64(), time_step.as_secs_f64())
    }

    /// Sets horizon and step in seconds.
    #[must_use]
    pub fn with_grid(mut self, duration: Scalar, time_step: Scalar) -> Self {
        self.duration = Some(duration);
        self.time_step = Some(time_step);
        self
    }

    /// Sets the source tag and its parameters.
    #[must_use]
    pub fn with_source(mut self, tag: impl Into<String>, params: SourceParams) -> Self {
        self.source = Some(tag.into());
        self.source_params = params;
        self
    }

    /// Sets the initial capacitor voltage and inductor current.
    #[must_use]
    pub fn with_initial_state(mut self, voltage: Scalar, current: Scalar) -> Self {
        self.initial_voltage = voltage;
        self.initial_current = current;
        self
    }

    fn build_source(&self) -> Result<Source, SimulationError> {
        let tag = self
            .source
            .as_deref()
            .ok_or(SimulationError::MissingParameter("source"))?;
        Ok(Source::create(tag, &self.source_params)?)
    }

    /// Validates the configuration, builds the matching solver and integrates.
    ///
    /// # Errors
    /// [`SimulationError::MissingParameter`] for an absent grid or source,
    /// [`SimulationError::InvalidConfig`] for inconsistent fields, and
    /// [`SimulationError::Circuit`] for anything the solver rejects.
    pub fn run(&self) -> Result<SimulationOutput, SimulationError> {
        let dt = self
            .time_step
            .ok_or(SimulationError::MissingParameter("time_step"))?;
        let t_end = self
            .duration
            .ok_or(SimulationError::MissingParameter("duration"))?;
        if !self.initial_voltage.is_finite() || !self.initial_current.is_finite() {
            return Err(SimulationError::InvalidConfig(format!(
                "{}: initial state must be finite",
                self.name
            )));
        }
        let _span = tracing::info_span!("simulation", name = %self.name).entered();
        let v0 = self.initial_voltage;

        let output = match self.circuit {
            CircuitSpec::LinearRc {
                resistance,
                capacitance,
            } => {
                let solver = LinearRcSolver::new(resistance, capacitance, dt)?;
                let trace = match self.build_source()? {
                    Source::Step(s) => solver.solve_step(s.amplitude, t_end, v0)?,
                    Source::Ramp(r) => solver.solve_ramp(r.slope, t_end, v0)?,
                    Source::Sinusoid(s) => solver.solve(&s, t_end, v0, None)?,
                };
                SimulationOutput::LinearRc(trace)
            }
            CircuitSpec::NonlinearRc {
                capacitance,
                device,
            } => {
                let source = self.build_source()?;
                let trace = match device {
                    DeviceSpec::Quadratic { k } => {
                        NonlinearRcSolver::new(capacitance, dt, QuadraticDevice::new(k)?)?
                            .solve(&source, t_end, v0)?
                    }
                    DeviceSpec::PiecewiseDiode => {
                        NonlinearRcSolver::new(capacitance, dt, PiecewiseDiode::new())?
                            .solve(&source, t_end, v0)?
                    }
                };
                SimulationOutput::NonlinearRc(trace)
            }
            CircuitSpec::Rlc {
                resistance,
                inductance,
                capacitance,
            } => {
                let solver = RlcSolver::new(resistance, inductance, capacitance, dt)?;
                let source = self.build_source()?;
                SimulationOutput::Rlc(solver.solve(&source, t_end, v0, self.initial_current)?)
            }
            CircuitSpec::DiodeRc {
                load_resistance,
                capacitance,
            } => {
                if let Some(tag) = &self.source {
                    return Err(SimulationError::InvalidConfig(format!(
                        "{}: diode rectifier has a fixed drive, got source {tag:?}",
                        self.name
                    )));
                }
                let solver = DiodeRcSolver::with_piecewise_diode(load_resistance, capacitance, dt)?;
                SimulationOutput::DiodeRc(solver.simulate(t_end, v0)?)
            }
        };
        tracing::debug!(samples = output.trace().len(), "simulation finished");
        Ok(output)
    }
}

/// Trace produced by [`SimulationConfig::run`], tagged by topology.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub enum SimulationOutput {
    /// Linear RC result.
    LinearRc(RcTrace),
    /// Nonlinear RC result.
    NonlinearRc(NonlinearRcTrace),
    /// Series RLC result.
    Rlc(RlcTrace),
    /// Diode rectifier result.
    DiodeRc(DiodeRcTrace),
}

impl SimulationOutput {
    /// Topology-independent view of the time and source sequences.
    #[must_use]
    pub fn trace(&self) -> &dyn Trace {
        match self {
            Self::LinearRc(t) => t,
            Self::NonlinearRc(t) => t,
            Self::Rlc(t) => t,
            Self::DiodeRc(t) => t,
        }
    }

    /// Capacitor voltage, which every topology records.
    #[must_use]
    pub fn capacitor_voltage(&self) -> &[Scalar] {
        match self {
            Self::LinearRc(t) => &t.voltage,
            Self::NonlinearRc(t) => &t.voltage,
            Self::Rlc(t) => &t.capacitor_voltage,
            Self::DiodeRc(t) => &t.output_voltage,
        }
    }
}

/// Errors that can occur while configuring or executing simulations.
#[derive(Debug, thiserror::Error)]
pub enum SimulationError {
    /// Raised when a required parameter is missing.
    #[error("missing parameter: {0}")]
    MissingParameter(&'static str),
    /// Raised when the configuration is internally inconsistent.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
    /// Raised by component construction or the solver.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn rc() -> CircuitSpec {
        CircuitSpec::LinearRc {
            resistance: 1000.0,
            capacitance: 1e-4,
        }
    }

    fn step(amplitude: Scalar) -> SourceParams {
        SourceParams {
            amplitude,
            ..SourceParams::default()
        }
    }

    #[test]
    fn linear_rc_step_carries_reference() {
        let output = SimulationConfig::new("rc", rc())
            .with_grid(0.5, 0.001)
            .with_source("Step", step(5.0))
            .run()
            .unwrap();
        let SimulationOutput::LinearRc(trace) = output else {
            panic!("expected linear RC output");
        };
        assert_eq!(trace.len(), 501);
        assert!(trace.max_error().unwrap() < 1e-2);
    }

    #[test]
    fn duration_constructor_matches_seconds() {
        let a = SimulationConfig::time("a", rc(), Duration::from_millis(500), Duration::from_millis(2));
        let b = SimulationConfig::new("a", rc()).with_grid(0.5, 0.002);
        assert_eq!(a, b);
    }

    #[test]
    fn missing_grid_and_source_are_reported() {
        let bare = SimulationConfig::new("rc", rc());
        assert!(matches!(
            bare.run(),
            Err(SimulationError::MissingParameter("time_step"))
        ));
        let no_source = bare.with_grid(0.1, 0.001);
        assert!(matches!(
            no_source.run(),
            Err(SimulationError::MissingParameter("source"))
        ));
    }

    #[test]
    fn unknown_source_tag_surfaces_as_circuit_error() {
        let err = SimulationConfig::new("rc", rc())
            .with_grid(0.1, 0.001)
            .with_source("square", step(1.0))
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Circuit(CircuitError::UnknownSource(ref tag)) if tag == "square"
        ));
        assert_eq!(err.to_string(), "unknown source type: square");
    }

    #[test]
    fn unstable_step_is_rejected() {
        let err = SimulationConfig::new("rc", rc())
            .with_grid(1.0, 0.3)
            .with_source("step", step(1.0))
            .run()
            .unwrap_err();
        assert!(matches!(
            err,
            SimulationError::Circuit(CircuitError::Unstable { .. })
        ));
    }

    #[test]
    fn rlc_uses_initial_state() {
        let circuit = CircuitSpec::Rlc {
            resistance: 10.0,
            inductance: 0.01,
            capacitance: 1e-4,
        };
        let output = SimulationConfig::new("rlc", circuit)
            .with_grid(1e-3, 1e-6)
            .with_source("step", step(0.0))
            .with_initial_state(1.0, 0.5)
            .run()
            .unwrap();
        let SimulationOutput::Rlc(trace) = &output else {
            panic!("expected RLC output");
        };
        assert_eq!(trace.capacitor_voltage[0], 1.0);
        assert_eq!(trace.inductor_current[0], 0.5);
        assert_eq!(output.capacitor_voltage().len(), output.trace().len());
    }

    #[test]
    fn nonlinear_rc_builds_requested_device() {
        let circuit = CircuitSpec::NonlinearRc {
            capacitance: 1e-3,
            device: DeviceSpec::Quadratic { k: 0.01 },
        };
        let output = SimulationConfig::new("quad", circuit)
            .with_grid(0.1, 1e-4)
            .with_source("step", step(5.0))
            .run()
            .unwrap();
        let SimulationOutput::NonlinearRc(trace) = output else {
            panic!("expected nonlinear RC output");
        };
        assert_relative_eq!(trace.device_current[0], 0.25);

        let bad = CircuitSpec::NonlinearRc {
            capacitance: 1e-3,
            device: DeviceSpec::Quadratic { k: -1.0 },
        };
        assert!(SimulationConfig::new("bad", bad)
            .with_grid(0.1, 1e-4)
            .with_source("step", step(5.0))
            .run()
            .is_err());
    }

    #[test]
    fn diode_rc_has_fixed_drive() {
        let circuit = CircuitSpec::DiodeRc {
            load_resistance: 1e3,
            capacitance: 1e-4,
        };
        let config = SimulationConfig::new("rectifier", circuit).with_grid(1.0, 1e-3);
        let output = config.run().unwrap();
        assert_eq!(output.trace().len(), 1000);

        let err = config.with_source("step", step(1.0)).run().unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }

    #[test]
    fn non_finite_initial_state_is_rejected() {
        let err = SimulationConfig::new("rc", rc())
            .with_grid(0.1, 0.001)
            .with_source("step", step(1.0))
            .with_initial_state(Scalar::NAN, 0.0)
            .run()
            .unwrap_err();
        assert!(matches!(err, SimulationError::InvalidConfig(_)));
    }
}
