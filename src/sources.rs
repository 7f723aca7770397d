//! Input waveforms driving the solvers.
//!
//! Every source is a pure function of time with immutable parameters, so it can be
//! re-evaluated at any `t` and shared freely between threads.

use std::fmt;
use std::str::FromStr;

use crate::constants::{hertz, period};
use crate::errors::{CircuitError, Result};
use crate::math::Scalar;

/// A scalar function of time in seconds.
///
/// Implemented for the built-in sources and for any `Fn(Scalar) -> Scalar`.
pub trait Waveform {
    /// Source value at time `t`.
    fn value_at(&self, t: Scalar) -> Scalar;

    /// Evaluates the waveform at every sample of `times`.
    fn sample(&self, times: &[Scalar]) -> Vec<Scalar> {
        times.iter().map(|&t| self.value_at(t)).collect()
    }
}

impl<F> Waveform for F
where
    F: Fn(Scalar) -> Scalar,
{
    fn value_at(&self, t: Scalar) -> Scalar {
        self(t)
    }
}

/// `A·u(t)`: zero before the origin, `A` from `t = 0` on.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// Step height.
    pub amplitude: Scalar,
}

impl Waveform for Step {
    fn value_at(&self, t: Scalar) -> Scalar {
        if t >= 0.0 {
            self.amplitude
        } else {
            0.0
        }
    }
}

/// `A·t·u(t)`: zero before the origin, rising linearly after it.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// Slope per second.
    pub slope: Scalar,
}

impl Waveform for Ramp {
    fn value_at(&self, t: Scalar) -> Scalar {
        if t >= 0.0 {
            self.slope * t
        } else {
            0.0
        }
    }
}

/// `A·sin(ωt + φ)` for all `t`.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sinusoid {
    /// Peak amplitude.
    pub amplitude: Scalar,
    /// Angular frequency ω in rad/s.
    pub omega: Scalar,
    /// Phase φ in radians.
    pub phase: Scalar,
}

impl Sinusoid {
    /// Zero-phase sinusoid.
    #[must_use]
    pub const fn new(amplitude: Scalar, omega: Scalar) -> Self {
        Self {
            amplitude,
            omega,
            phase: 0.0,
        }
    }

    /// Same sinusoid shifted by `phase` radians.
    #[must_use]
    pub const fn with_phase(self, phase: Scalar) -> Self {
        Self { phase, ..self }
    }

    /// Period `2π/ω` in seconds.
    #[must_use]
    pub fn period(&self) -> Scalar {
        period(self.omega)
    }

    /// Linear frequency in hertz.
    #[must_use]
    pub fn frequency_hz(&self) -> Scalar {
        hertz(self.omega)
    }
}

impl Waveform for Sinusoid {
    fn value_at(&self, t: Scalar) -> Scalar {
        self.amplitude * (self.omega * t + self.phase).sin()
    }
}

/// Type tag accepted by [`Source::create`].
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `step`
    Step,
    /// `ramp`
    Ramp,
    /// `sine` or `sinusoid`
    Sinusoid,
}

impl FromStr for SourceKind {
    type Err = CircuitError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "step" => Ok(Self::Step),
            "ramp" => Ok(Self::Ramp),
            "sine" | "sinusoid" => Ok(Self::Sinusoid),
            _ => Err(CircuitError::UnknownSource(s.to_owned())),
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Step => "step",
            Self::Ramp => "ramp",
            Self::Sinusoid => "sine",
        })
    }
}

/// Parameters consumed by the factory; each kind reads only the fields it needs.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SourceParams {
    /// Step height or sinusoid peak.
    pub amplitude: Scalar,
    /// Ramp slope per second.
    pub slope: Scalar,
    /// Sinusoid angular frequency in rad/s.
    pub omega: Scalar,
    /// Sinusoid phase in radians.
    pub phase: Scalar,
}

/// One of the three canonical sources.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Source {
    /// Step input.
    Step(Step),
    /// Ramp input.
    Ramp(Ramp),
    /// Sinusoidal input.
    Sinusoid(Sinusoid),
}

impl Source {
    /// Builds a source from a textual type tag.
    ///
    /// # Errors
    /// [`CircuitError::UnknownSource`] for any tag other than `step`, `ramp`, `sine` or
    /// `sinusoid` (case-insensitive).
    pub fn create(tag: &str, params: &SourceParams) -> Result<Self> {
        Ok(Self::from_kind(tag.parse()?, params))
    }

    /// Builds a source from an already parsed tag.
    #[must_use]
    pub fn from_kind(kind: SourceKind, params: &SourceParams) -> Self {
        match kind {
            SourceKind::Step => Self::Step(Step {
                amplitude: params.amplitude,
            }),
            SourceKind::Ramp => Self::Ramp(Ramp {
                slope: params.slope,
            }),
            SourceKind::Sinusoid => Self::Sinusoid(
                Sinusoid::new(params.amplitude, params.omega).with_phase(params.phase),
            ),
        }
    }

    /// Tag of this source.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        match self {
            Self::Step(_) => SourceKind::Step,
            Self::Ramp(_) => SourceKind::Ramp,
            Self::Sinusoid(_) => SourceKind::Sinusoid,
        }
    }
}

impl Waveform for Source {
    fn value_at(&self, t: Scalar) -> Scalar {
        match self {
            Self::Step(s) => s.value_at(t),
            Self::Ramp(r) => r.value_at(t),
            Self::Sinusoid(s) => s.value_at(t),
        }
    }
}

impl From<Step> for Source {
    fn from(value: Step) -> Self {
        Self::Step(value)
    }
}

impl From<Ramp> for Source {
    fn from(value: Ramp) -> Self {
        Self::Ramp(value)
    }
}

impl From<Sinusoid> for Source {
    fn from(value: Sinusoid) -> Self {
        Self::Sinusoid(value)
    }
}
