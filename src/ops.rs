//! Logic operators over membership degrees.
//!
//! The plain [`and`], [`or`] and [`not`] are the Zadeh operators used by
//! default everywhere. [`AndOp`] and [`OrOp`] select another t-norm or
//! t-conorm for condition evaluation.

use num::Float;

use crate::unit_interval::UnitInterval;

/// Fuzzy AND: `min(a, b)`
pub fn and(a: UnitInterval, b: UnitInterval) -> UnitInterval {
    a.min(b)
}

/// Fuzzy OR: `max(a, b)`
pub fn or(a: UnitInterval, b: UnitInterval) -> UnitInterval {
    a.max(b)
}

/// Fuzzy NOT: `1 - a`
pub fn not(a: UnitInterval) -> UnitInterval {
    a.complement()
}

/// And operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call(self, u: UnitInterval, v: UnitInterval) -> UnitInterval {
        UnitInterval::saturating(self.apply(u.value(), v.value()))
    }

    fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator method for combining the compositions of propositions
/// in a fuzzy rule premise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call(self, u: UnitInterval, v: UnitInterval) -> UnitInterval {
        UnitInterval::saturating(self.apply(u.value(), v.value()))
    }

    fn apply<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

#[cfg(test)]
fn zo(v: f64) -> UnitInterval {
    UnitInterval::new(v).unwrap()
}

#[test]
fn test_zadeh_operators() {
    assert_eq!(and(zo(0.3), zo(0.7)), zo(0.3));
    assert_eq!(or(zo(0.3), zo(0.7)), zo(0.7));
    assert_eq!(not(zo(0.25)), zo(0.75));
    assert_eq!(not(UnitInterval::ZERO), UnitInterval::ONE);
    assert_eq!(not(UnitInterval::ONE), UnitInterval::ZERO);
}

#[test]
fn test_default_ops_match_zadeh() {
    let (a, b) = (zo(0.4), zo(0.9));

    assert_eq!(AndOp::default().call(a, b), and(a, b));
    assert_eq!(OrOp::default().call(a, b), or(a, b));
}

#[test]
fn test_t_norms() {
    let (a, b) = (zo(0.5), zo(0.75));

    assert_eq!(AndOp::Prod.call(a, b), zo(0.375));
    assert_eq!(AndOp::BoundedProd.call(a, b), zo(0.25));
    assert_eq!(AndOp::BoundedProd.call(zo(0.25), zo(0.5)), UnitInterval::ZERO);
    assert_eq!(AndOp::DrasticProd.call(a, b), UnitInterval::ZERO);
    assert_eq!(AndOp::DrasticProd.call(a, UnitInterval::ONE), a);
    assert_eq!(AndOp::DrasticProd.call(UnitInterval::ONE, b), b);
}

#[test]
fn test_t_conorms() {
    let (a, b) = (zo(0.5), zo(0.75));

    assert_eq!(OrOp::ProbOr.call(a, b), zo(0.875));
    assert_eq!(OrOp::BoundedSum.call(a, b), UnitInterval::ONE);
    assert_eq!(OrOp::BoundedSum.call(zo(0.25), zo(0.5)), zo(0.75));
    assert_eq!(OrOp::DrasticSum.call(a, b), UnitInterval::ONE);
    assert_eq!(OrOp::DrasticSum.call(a, UnitInterval::ZERO), a);
    assert_eq!(OrOp::DrasticSum.call(UnitInterval::ZERO, b), b);
}
