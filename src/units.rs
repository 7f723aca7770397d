//! Strongly typed quantity wrappers for component parameters.

use std::fmt;
use std::marker::PhantomData;

use crate::math::Scalar;

/// Marker trait for SI units carried by a [`Quantity`].
pub trait Unit {
    /// Printable unit symbol.
    const SYMBOL: &'static str;
}

macro_rules! unit {
    ($(#[$doc:meta])* $name:ident, $symbol:literal) => {
        $(#[$doc])*
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $name;

        impl Unit for $name {
            const SYMBOL: &'static str = $symbol;
        }
    };
}

unit!(
    /// Resistance in ohms.
    Ohm, "Ω"
);
unit!(
    /// Capacitance in farads.
    Farad, "F"
);
unit!(
    /// Inductance in henries.
    Henry, "H"
);

/// A scalar magnitude tagged with its unit at the type level.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quantity<T, U> {
    value: T,
    #[cfg_attr(feature = "serde", serde(skip))]
    unit: PhantomData<U>,
}

impl<T: Copy, U> Quantity<T, U> {
    /// Wraps a raw magnitude.
    #[must_use]
    pub const fn new(value: T) -> Self {
        Self {
            value,
            unit: PhantomData,
        }
    }

    /// Returns the raw magnitude.
    #[must_use]
    pub fn value(&self) -> T {
        self.value
    }
}

impl<U: Unit> fmt::Display for Quantity<Scalar, U> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3e} {}", self.value, U::SYMBOL)
    }
}

/// Resistance in ohms.
pub type Resistance = Quantity<Scalar, Ohm>;
/// Capacitance in farads.
pub type Capacitance = Quantity<Scalar, Farad>;
/// Inductance in henries.
pub type Inductance = Quantity<Scalar, Henry>;
