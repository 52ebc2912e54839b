//! Piecewise-linear membership functions.
//!
//! Every shape is described by its knots, the vertices of its graph in
//! ascending x order, and its degree is interpolated between them.

use crate::error::{Error, Result};
use crate::math::interp;
use crate::unit_interval::UnitInterval;

/// Maps a crisp value to a degree of membership.
///
/// Construct through the validated constructors; outside this crate the
/// variants can only be matched, with `Variant { .. }`. Deserialization goes
/// through the same checks.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Shape", into = "Shape")
)]
pub enum MembershipFunction {
    /// One at `x0`, zero elsewhere
    #[non_exhaustive]
    Singleton(f64),
    /// Zero outside `[a, c]`, one at `b`
    #[non_exhaustive]
    Triangular(f64, f64, f64),
    /// Zero outside `[a, d]`, one on `[b, c]`
    #[non_exhaustive]
    Trapezoidal(f64, f64, f64, f64),
    /// Zero below `a`, one from `b` onwards
    #[non_exhaustive]
    TrapezoidalOpenRight(f64, f64),
}

/// Unchecked wire form of [`MembershipFunction`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
enum Shape {
    Singleton(f64),
    Triangular(f64, f64, f64),
    Trapezoidal(f64, f64, f64, f64),
    TrapezoidalOpenRight(f64, f64),
}

#[cfg(feature = "serde")]
impl TryFrom<Shape> for MembershipFunction {
    type Error = Error;

    fn try_from(shape: Shape) -> Result<Self> {
        match shape {
            Shape::Singleton(x0) => Self::singleton(x0),
            Shape::Triangular(a, b, c) => Self::triangular(a, b, c),
            Shape::Trapezoidal(a, b, c, d) => Self::trapezoidal(a, b, c, d),
            Shape::TrapezoidalOpenRight(a, b) => Self::trapezoidal_open_right(a, b),
        }
    }
}

#[cfg(feature = "serde")]
impl From<MembershipFunction> for Shape {
    fn from(function: MembershipFunction) -> Self {
        match function {
            MembershipFunction::Singleton(x0) => Shape::Singleton(x0),
            MembershipFunction::Triangular(a, b, c) => Shape::Triangular(a, b, c),
            MembershipFunction::Trapezoidal(a, b, c, d) => Shape::Trapezoidal(a, b, c, d),
            MembershipFunction::TrapezoidalOpenRight(a, b) => Shape::TrapezoidalOpenRight(a, b),
        }
    }
}

fn check_finite(params: &[f64]) -> Result<()> {
    if params.iter().all(|p| p.is_finite()) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(format!(
            "membership parameters must be finite, got {params:?}"
        )))
    }
}

fn check_ordered(params: &[f64]) -> Result<()> {
    if params.windows(2).all(|w| w[0] <= w[1]) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(format!(
            "membership parameters must be ascending, got {params:?}"
        )))
    }
}

impl MembershipFunction {
    pub fn singleton(x0: f64) -> Result<Self> {
        check_finite(&[x0])?;

        Ok(Self::Singleton(x0))
    }

    /// Requires `a <= b <= c`.
    pub fn triangular(a: f64, b: f64, c: f64) -> Result<Self> {
        check_finite(&[a, b, c])?;
        check_ordered(&[a, b, c])?;

        Ok(Self::Triangular(a, b, c))
    }

    /// Requires `a <= b <= c <= d`.
    pub fn trapezoidal(a: f64, b: f64, c: f64, d: f64) -> Result<Self> {
        check_finite(&[a, b, c, d])?;
        check_ordered(&[a, b, c, d])?;

        Ok(Self::Trapezoidal(a, b, c, d))
    }

    /// Requires `a <= b`. Saturates to one for every `x >= b`.
    pub fn trapezoidal_open_right(a: f64, b: f64) -> Result<Self> {
        check_finite(&[a, b])?;
        check_ordered(&[a, b])?;

        Ok(Self::TrapezoidalOpenRight(a, b))
    }

    /// Total over the reals, including values far outside the support.
    pub fn degree(&self, x: f64) -> UnitInterval {
        let degree = match *self {
            Self::Singleton(x0) => {
                if x == x0 {
                    1.
                } else {
                    0.
                }
            },
            _ => interp(x, &self.vertices()),
        };

        UnitInterval::saturating(degree)
    }

    /// Shape vertices as `(x, degree(x))`, ascending by x and not deduplicated.
    pub fn knots(&self) -> Vec<(f64, f64)> {
        self.vertices()
            .into_iter()
            .map(|(x, _)| (x, self.degree(x).value()))
            .collect()
    }

    // The outline as drawn. Where a vertical edge doubles up an abscissa
    // (a == b, say) both ends are listed; interp takes the upper one.
    fn vertices(&self) -> Vec<(f64, f64)> {
        match *self {
            Self::Singleton(x0) => vec![(x0, 1.)],
            Self::Triangular(a, b, c) => vec![(a, 0.), (b, 1.), (c, 0.)],
            Self::Trapezoidal(a, b, c, d) => vec![(a, 0.), (b, 1.), (c, 1.), (d, 0.)],
            Self::TrapezoidalOpenRight(a, b) => vec![(a, 0.), (b, 1.)],
        }
    }
}

#[test]
fn test_triangular() {
    let tri = MembershipFunction::triangular(0., 1., 3.).unwrap();

    assert_eq!(tri.degree(0.).value(), 0.);
    assert_eq!(tri.degree(0.5).value(), 0.5);
    assert_eq!(tri.degree(1.).value(), 1.);
    assert_eq!(tri.degree(2.).value(), 0.5);
    assert_eq!(tri.degree(3.).value(), 0.);
    assert_eq!(tri.degree(-1e300).value(), 0.);
    assert_eq!(tri.degree(1e300).value(), 0.);
    assert_eq!(tri.knots(), vec![(0., 0.), (1., 1.), (3., 0.)]);
}

#[test]
fn test_trapezoidal() {
    let trap = MembershipFunction::trapezoidal(0., 2., 4., 8.).unwrap();

    assert_eq!(trap.degree(1.).value(), 0.5);
    assert_eq!(trap.degree(2.).value(), 1.);
    assert_eq!(trap.degree(3.).value(), 1.);
    assert_eq!(trap.degree(4.).value(), 1.);
    assert_eq!(trap.degree(6.).value(), 0.5);
    assert_eq!(trap.degree(9.).value(), 0.);
    assert_eq!(trap.knots(), vec![(0., 0.), (2., 1.), (4., 1.), (8., 0.)]);
}

#[test]
fn test_trapezoidal_open_right() {
    let open = MembershipFunction::trapezoidal_open_right(10., 20.).unwrap();

    assert_eq!(open.degree(5.).value(), 0.);
    assert_eq!(open.degree(15.).value(), 0.5);
    assert_eq!(open.degree(20.).value(), 1.);
    assert_eq!(open.degree(f64::MAX).value(), 1.);
    assert_eq!(open.degree(f64::INFINITY).value(), 1.);
    assert_eq!(open.knots(), vec![(10., 0.), (20., 1.)]);
}

#[test]
fn test_singleton() {
    let single = MembershipFunction::singleton(4.).unwrap();

    assert_eq!(single.degree(4.).value(), 1.);
    assert_eq!(single.degree(4.0001).value(), 0.);
    assert_eq!(single.degree(-4.).value(), 0.);
    assert_eq!(single.knots(), vec![(4., 1.)]);
}

#[test]
fn test_vertical_edges() {
    let left = MembershipFunction::triangular(0., 0., 2.).unwrap();
    let right = MembershipFunction::trapezoidal(0., 1., 3., 3.).unwrap();
    let step = MembershipFunction::trapezoidal_open_right(5., 5.).unwrap();

    assert_eq!(left.degree(0.).value(), 1.);
    assert_eq!(left.degree(-0.1).value(), 0.);
    assert_eq!(left.degree(0.5).value(), 0.75);
    assert_eq!(left.knots(), vec![(0., 1.), (0., 1.), (2., 0.)]);
    assert_eq!(right.degree(3.).value(), 1.);
    assert_eq!(right.degree(3.5).value(), 0.);
    assert_eq!(step.degree(4.999).value(), 0.);
    assert_eq!(step.degree(5.).value(), 1.);
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(
        MembershipFunction::triangular(2., 1., 3.),
        Err(Error::InvalidParameter(_))
    ));
    assert!(MembershipFunction::trapezoidal(0., 1., 3., 2.).is_err());
    assert!(MembershipFunction::trapezoidal_open_right(1., 0.).is_err());
    assert!(MembershipFunction::singleton(f64::NAN).is_err());
    assert!(MembershipFunction::triangular(0., 1., f64::INFINITY).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_deserialize_validates() {
    let tri: MembershipFunction = serde_json::from_str(r#"{"Triangular":[0.0,1.0,3.0]}"#).unwrap();

    assert_eq!(tri, MembershipFunction::triangular(0., 1., 3.).unwrap());
    assert_eq!(serde_json::to_string(&tri).unwrap(), r#"{"Triangular":[0.0,1.0,3.0]}"#);

    let unsorted = serde_json::from_str::<MembershipFunction>(r#"{"Triangular":[3.0,1.0,2.0]}"#);
    let err = unsorted.unwrap_err().to_string();

    assert!(err.contains("ascending"), "{err}");
    assert!(serde_json::from_str::<MembershipFunction>(r#"{"TrapezoidalOpenRight":[2.0,1.0]}"#).is_err());
}
