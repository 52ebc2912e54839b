use std::fmt;

use crate::error::{Error, Result};

/// A value between zero and one
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "f64", into = "f64"))]
pub struct UnitInterval(f64);

impl UnitInterval {
    pub const ZERO: Self = Self(0.);
    pub const ONE: Self = Self(1.);

    /// Fails with [`Error::InvalidParameter`] unless `value` lies in `[0, 1]`.
    pub fn new(value: f64) -> Result<Self> {
        if (0. ..=1.).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::invalid_parameter(format!(
                "degree {value} is outside of [0, 1]"
            )))
        }
    }

    /// For values computed from other degrees, where rounding error may
    /// land a hair outside the range. NaN collapses to zero.
    pub(crate) fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0., 1.))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn min(self, other: Self) -> Self {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    pub fn max(self, other: Self) -> Self {
        if other.0 > self.0 {
            other
        } else {
            self
        }
    }

    /// `1 - self`
    pub fn complement(self) -> Self {
        Self(1. - self.0)
    }
}

impl TryFrom<f64> for UnitInterval {
    type Error = Error;

    fn try_from(value: f64) -> Result<Self> {
        Self::new(value)
    }
}

impl From<UnitInterval> for f64 {
    fn from(value: UnitInterval) -> Self {
        value.0
    }
}

impl fmt::Display for UnitInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[test]
fn test_unit_interval_bounds() {
    assert_eq!(UnitInterval::new(0.).map(UnitInterval::value), Ok(0.));
    assert_eq!(UnitInterval::new(1.).map(UnitInterval::value), Ok(1.));
    assert!(UnitInterval::new(-0.0001).is_err());
    assert!(UnitInterval::new(1.0001).is_err());
    assert!(UnitInterval::new(f64::NAN).is_err());
    assert!(UnitInterval::try_from(f64::INFINITY).is_err());
}

#[test]
fn test_unit_interval_saturating() {
    assert_eq!(UnitInterval::saturating(1.0000000001), UnitInterval::ONE);
    assert_eq!(UnitInterval::saturating(-3.), UnitInterval::ZERO);
    assert_eq!(UnitInterval::saturating(f64::NAN), UnitInterval::ZERO);
}

#[test]
fn test_unit_interval_complement() {
    let a = UnitInterval::new(0.25).unwrap();

    assert_eq!(a.complement().value(), 0.75);
    assert_eq!(UnitInterval::ZERO.complement(), UnitInterval::ONE);
    assert_eq!(a.min(UnitInterval::ONE), a);
    assert_eq!(a.max(UnitInterval::ONE), UnitInterval::ONE);
}
