#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![warn(clippy::all, clippy::cargo, clippy::nursery, missing_docs)]
#![doc = include_str!("../README.md")]

/// Numerical constants and frequency conversions.
pub mod constants;
/// Strongly typed unit helpers and quantity abstractions.
pub mod units;
/// Scalar and state-space aliases shared by the solvers.
pub mod math;
/// Circuit elements, nonlinear devices and static analysis.
pub mod circuits;
/// Time-domain input waveforms and the source factory.
pub mod sources;
/// Fixed-step transient solvers.
pub mod solvers;
/// Grid builders and post-processing helpers.
pub mod sweep;
/// Declarative run configuration.
pub mod simulation;
/// Error types shared between modules.
pub mod errors;

/// Common exports for downstream crates.
pub mod prelude;

pub use errors::{CircuitError, Result};
