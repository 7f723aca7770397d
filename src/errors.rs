//! Shared error types used across submodules.

use thiserror::Error;

use crate::circuits::element::ElementKind;
use crate::math::Scalar;

/// Top-level error type for component construction, evaluation and solving.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    /// A physical parameter or step size was not strictly positive (or not finite).
    #[error("invalid parameter: {name} must be positive and finite, got {value}")]
    InvalidParameter {
        /// Parameter name as it appears in the circuit equations.
        name: &'static str,
        /// Offending value.
        value: Scalar,
    },
    /// The forward Euler step exceeds the stability limit of the linear RC equation.
    #[error("time step dt={dt:e} s violates the stability condition dt < 2τ = {limit:e} s")]
    Unstable {
        /// Requested step size in seconds.
        dt: Scalar,
        /// Exclusive upper bound 2τ in seconds.
        limit: Scalar,
    },
    /// A quantity was requested at a point where it has no finite value.
    #[error("{0} is undefined")]
    DomainUndefined(&'static str),
    /// The source factory received a tag it does not know.
    #[error("unknown source type: {0}")]
    UnknownSource(String),
    /// An element variant was asked for a law it does not have.
    #[error("{kind} has no {capability}")]
    MissingCapability {
        /// Variant that was queried.
        kind: ElementKind,
        /// Capability that was requested.
        capability: &'static str,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, CircuitError>;

/// Returns `value` when it is finite and strictly positive.
pub(crate) fn ensure_positive(name: &'static str, value: Scalar) -> Result<Scalar> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(CircuitError::InvalidParameter { name, value })
    }
}
