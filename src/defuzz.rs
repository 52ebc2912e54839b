//! Reduction of fired fuzzy outputs to one crisp value.
//!
//! All defuzzifiers share the same front end: every output must carry the
//! same subject, each output's membership is clipped by its firing strength
//! (min), and the clipped shapes are aggregated (max) at a set of sample
//! abscissas. They differ in which abscissas are sampled and how the
//! aggregated samples are reduced.

use crate::error::{Error, Result};
use crate::label::Label;
use crate::linspace::Linspace;
use crate::math::round_to;
use crate::outputs::{FuzzyOutput, Output};

pub const MIN_PRECISION: u32 = 1;
pub const MAX_PRECISION: u32 = 15;
pub const DEFAULT_PRECISION: u32 = 4;

pub trait Defuzzifier {
    /// Fails with [`Error::EmptyInput`] for no outputs,
    /// [`Error::InconsistentSubject`] for mixed subjects and
    /// [`Error::DegenerateAggregate`] when nothing has any membership and
    /// [`Error::NonFiniteResult`] when the crisp value overflows.
    fn defuzzify(&self, outputs: &[FuzzyOutput]) -> Result<Output>;

    /// Decimal places the result is rounded to.
    fn precision(&self) -> u32;
}

fn check_precision(precision: u32) -> Result<u32> {
    if (MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
        Ok(precision)
    } else {
        Err(Error::invalid_parameter(format!(
            "precision must be within {MIN_PRECISION}..={MAX_PRECISION}, got {precision}"
        )))
    }
}

fn shared_subject(outputs: &[FuzzyOutput]) -> Result<&Label> {
    let (first, rest) = outputs.split_first().ok_or(Error::EmptyInput)?;
    let expected = first.subject();

    match rest.iter().find(|o| o.subject() != expected) {
        Some(other) => Err(Error::InconsistentSubject {
            expected: expected.clone(),
            found: other.subject().clone(),
        }),
        None => Ok(expected),
    }
}

/// Every knot abscissa of every output, concatenated and stably sorted.
/// Duplicates are kept.
fn knot_abscissas(outputs: &[FuzzyOutput]) -> Vec<f64> {
    let mut xs: Vec<f64> = outputs
        .iter()
        .flat_map(|o| o.output_function().knots())
        .map(|(x, _)| x)
        .collect();

    xs.sort_by(f64::total_cmp);
    xs
}

/// `(x, max over outputs of min(degree(x), strength))` for every x.
fn aggregate(outputs: &[FuzzyOutput], xs: impl IntoIterator<Item = f64>) -> Vec<(f64, f64)> {
    xs.into_iter()
        .map(|x| {
            let degree = outputs
                .iter()
                .map(|o| o.clipped_degree(x).value())
                .fold(0., f64::max);

            tracing::trace!(x, degree, "aggregated sample");

            (x, degree)
        })
        .collect()
}

fn finite_output(subject: &Label, value: f64, precision: u32) -> Result<Output> {
    if !value.is_finite() {
        return Err(Error::NonFiniteResult(subject.clone()));
    }

    Ok(Output::new(subject.clone(), round_to(value, precision)))
}

fn centroid(subject: &Label, samples: &[(f64, f64)], precision: u32) -> Result<Output> {
    let (total_weight, total_membership) = samples
        .iter()
        .fold((0f64, 0f64), |(weight, membership), (x, degree)| {
            (weight + x * degree, membership + degree)
        });

    if total_membership == 0. {
        return Err(Error::DegenerateAggregate(subject.clone()));
    }

    let output = finite_output(subject, total_weight / total_membership, precision)?;

    tracing::debug!(subject = %subject, value = output.value(), total_weight, total_membership, "defuzzified");

    Ok(output)
}

/// Centroid sampled only at the knots of the contributing shapes.
///
/// Knots are summed once per occurrence, so an abscissa shared by two shapes
/// is weighted twice. This makes the result an approximation of the
/// continuous centroid: exact for simple symmetric cases, biased for
/// overlapping shapes. See [`GridCentroid`] for a denser sampling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CentroidDefuzzifier {
    precision: u32,
}

impl CentroidDefuzzifier {
    /// `precision` must be within `1..=15`.
    pub fn new(precision: u32) -> Result<Self> {
        Ok(Self {
            precision: check_precision(precision)?,
        })
    }
}

impl Default for CentroidDefuzzifier {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Defuzzifier for CentroidDefuzzifier {
    fn defuzzify(&self, outputs: &[FuzzyOutput]) -> Result<Output> {
        let subject = shared_subject(outputs)?;
        let samples = aggregate(outputs, knot_abscissas(outputs));

        centroid(subject, &samples, self.precision)
    }

    fn precision(&self) -> u32 {
        self.precision
    }
}

/// Centroid sampled at evenly spaced abscissas between the outermost knots.
///
/// A singleton only counts if it falls exactly on a sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridCentroid {
    samples: usize,
    precision: u32,
}

impl GridCentroid {
    /// Needs at least two samples.
    pub fn new(samples: usize, precision: u32) -> Result<Self> {
        if samples < 2 {
            return Err(Error::invalid_parameter(format!(
                "grid centroid needs at least 2 samples, got {samples}"
            )));
        }

        Ok(Self {
            samples,
            precision: check_precision(precision)?,
        })
    }
}

impl Defuzzifier for GridCentroid {
    fn defuzzify(&self, outputs: &[FuzzyOutput]) -> Result<Output> {
        let subject = shared_subject(outputs)?;
        let knots = knot_abscissas(outputs);
        let (Some(&min), Some(&max)) = (knots.first(), knots.last()) else {
            return Err(Error::EmptyInput);
        };
        let samples = aggregate(outputs, Linspace::new(min, max, self.samples));

        centroid(subject, &samples, self.precision)
    }

    fn precision(&self) -> u32 {
        self.precision
    }
}

/// Which of the maximising abscissas to report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaximumOp {
    /// Mean of the values for which the membership function is maximum
    Mean,
    /// Largest value for which the membership function is maximum
    Largest,
    /// Smallest value for which the membership function is maximum
    Smallest,
}

/// Maximum based reduction over the aggregated knot samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MaximumDefuzzifier {
    op: MaximumOp,
    precision: u32,
}

impl MaximumDefuzzifier {
    pub fn new(op: MaximumOp, precision: u32) -> Result<Self> {
        Ok(Self {
            op,
            precision: check_precision(precision)?,
        })
    }
}

impl Defuzzifier for MaximumDefuzzifier {
    fn defuzzify(&self, outputs: &[FuzzyOutput]) -> Result<Output> {
        let subject = shared_subject(outputs)?;
        let samples = aggregate(outputs, knot_abscissas(outputs));
        let maximum = samples.iter().map(|(_, degree)| *degree).fold(0., f64::max);

        if maximum == 0. {
            return Err(Error::DegenerateAggregate(subject.clone()));
        }

        let argmax = samples.iter().filter(|(_, degree)| *degree == maximum).map(|(x, _)| *x);
        let value = match self.op {
            MaximumOp::Mean => {
                let (len, sum) = argmax.fold((0usize, 0f64), |(len, sum), x| (len + 1, sum + x));

                sum / len as f64
            },
            MaximumOp::Largest => argmax.fold(f64::NEG_INFINITY, f64::max),
            MaximumOp::Smallest => argmax.fold(f64::INFINITY, f64::min),
        };

        finite_output(subject, value, self.precision)
    }

    fn precision(&self) -> u32 {
        self.precision
    }
}

#[cfg(test)]
use crate::membership::MembershipFunction;
#[cfg(test)]
use crate::set::FuzzySet;
#[cfg(test)]
use crate::unit_interval::UnitInterval;

#[cfg(test)]
fn output(subject: &str, function: Result<MembershipFunction>, strength: f64) -> FuzzyOutput {
    FuzzyOutput::new(
        Label::new(subject).unwrap(),
        FuzzySet::new("set", function.unwrap()).unwrap(),
        UnitInterval::new(strength).unwrap(),
    )
}

#[cfg(test)]
fn cog(precision: u32) -> CentroidDefuzzifier {
    CentroidDefuzzifier::new(precision).unwrap()
}

#[test]
fn test_symmetric_triangle_is_apex() {
    let outputs = [output("S", MembershipFunction::triangular(-1., 0., 1.), 0.5)];
    let result = cog(4).defuzzify(&outputs).unwrap();

    assert_eq!(result.subject().as_str(), "S");
    assert_eq!(result.value(), 0.);
}

#[test]
fn test_disjoint_triangles_midpoint() {
    let outputs = [
        output("S", MembershipFunction::triangular(1., 2., 3.), 1.),
        output("S", MembershipFunction::triangular(3., 4., 5.), 1.),
    ];

    assert_eq!(cog(4).defuzzify(&outputs).unwrap().value(), 3.);
}

#[test]
fn test_weaker_rule_pulls_less() {
    // knots 1,2,3,3,4,5 -> degrees 0,1,0,0,0.5,0: (2 + 2) / 1.5
    let outputs = [
        output("S", MembershipFunction::triangular(1., 2., 3.), 1.),
        output("S", MembershipFunction::triangular(3., 4., 5.), 0.5),
    ];

    assert_eq!(cog(3).defuzzify(&outputs).unwrap().value(), 2.667);
}

#[test]
fn test_duplicate_knots_are_counted_per_occurrence() {
    // knots 0,1,2,2,3,4,6 -> degrees 0,1,1,1,0.5,1,0
    // 10.5 / 4.5 here; deduplicating x = 2 would give 8.5 / 3.5.
    let outputs = [
        output("S", MembershipFunction::trapezoidal(0., 1., 2., 3.), 1.),
        output("S", MembershipFunction::triangular(2., 4., 6.), 1.),
    ];

    assert_eq!(cog(4).defuzzify(&outputs).unwrap().value(), 2.3333);
}

#[test]
fn test_rounding_precision() {
    let outputs = [
        output("S", MembershipFunction::triangular(1., 2., 3.), 1.),
        output("S", MembershipFunction::triangular(3., 4., 5.), 0.5),
    ];

    // 4 / 1.5
    let fine = cog(15).defuzzify(&outputs).unwrap().value();

    assert_eq!(cog(1).defuzzify(&outputs).unwrap().value(), 2.7);
    assert_eq!(cog(4).defuzzify(&outputs).unwrap().value(), 2.6667);
    assert!((fine - 8. / 3.).abs() < 1e-14, "{fine}");
    assert_eq!(cog(15).precision(), 15);
}

#[test]
fn test_huge_abscissas_stay_finite() {
    let outputs = [output("S", MembershipFunction::triangular(1e294, 2e294, 3e294), 1.)];

    assert_eq!(cog(15).defuzzify(&outputs).unwrap().value(), 2e294);
}

#[test]
fn test_overflowing_weight_is_rejected() {
    // 1.2e308 + 1.5e308 overflows the weighted sum
    let outputs = [output("S", MembershipFunction::trapezoidal(1e308, 1.2e308, 1.5e308, 1.7e308), 1.)];
    let subject = Label::new("S").unwrap();

    assert_eq!(cog(4).defuzzify(&outputs), Err(Error::NonFiniteResult(subject.clone())));
    assert_eq!(
        MaximumDefuzzifier::new(MaximumOp::Mean, 4).unwrap().defuzzify(&outputs),
        Err(Error::NonFiniteResult(subject))
    );
}

#[test]
fn test_empty_input() {
    assert_eq!(cog(4).defuzzify(&[]), Err(Error::EmptyInput));
}

#[test]
fn test_inconsistent_subject() {
    let outputs = [
        output("A", MembershipFunction::triangular(1., 2., 3.), 1.),
        output("A", MembershipFunction::triangular(2., 3., 4.), 1.),
        output("B", MembershipFunction::triangular(3., 4., 5.), 1.),
    ];

    assert_eq!(
        cog(4).defuzzify(&outputs),
        Err(Error::InconsistentSubject {
            expected: Label::new("A").unwrap(),
            found: Label::new("B").unwrap(),
        })
    );
}

#[test]
fn test_all_vacuous_is_degenerate() {
    let outputs = [
        output("S", MembershipFunction::triangular(1., 2., 3.), 0.),
        output("S", MembershipFunction::triangular(3., 4., 5.), 0.),
    ];

    assert_eq!(
        cog(4).defuzzify(&outputs),
        Err(Error::DegenerateAggregate(Label::new("S").unwrap()))
    );
}

#[test]
fn test_zero_strength_output_is_ignored() {
    let outputs = [
        output("S", MembershipFunction::triangular(1., 2., 3.), 0.8),
        output("S", MembershipFunction::triangular(10., 20., 30.), 0.),
    ];

    assert_eq!(cog(4).defuzzify(&outputs).unwrap().value(), 2.);
}

#[test]
fn test_singleton_and_open_right() {
    let single = [output("S", MembershipFunction::singleton(7.), 0.3)];
    let open = [output("S", MembershipFunction::trapezoidal_open_right(2., 4.), 1.)];

    assert_eq!(cog(4).defuzzify(&single).unwrap().value(), 7.);
    // knots 2, 4 -> degrees 0, 1
    assert_eq!(cog(4).defuzzify(&open).unwrap().value(), 4.);
}

#[test]
fn test_invalid_precision() {
    assert!(matches!(CentroidDefuzzifier::new(0), Err(Error::InvalidParameter(_))));
    assert!(matches!(CentroidDefuzzifier::new(16), Err(Error::InvalidParameter(_))));
    assert!(GridCentroid::new(100, 0).is_err());
    assert!(GridCentroid::new(1, 4).is_err());
    assert!(MaximumDefuzzifier::new(MaximumOp::Mean, 20).is_err());
    assert_eq!(CentroidDefuzzifier::default().precision(), DEFAULT_PRECISION);
}

#[test]
fn test_grid_centroid() {
    let symmetric = [output("S", MembershipFunction::triangular(0., 1., 2.), 1.)];
    let right_angle = [output("S", MembershipFunction::triangular(0., 0., 3.), 1.)];

    assert_eq!(GridCentroid::new(5, 4).unwrap().defuzzify(&symmetric).unwrap().value(), 1.);

    // The continuous centroid is 1; knots alone only see the vertical edge.
    let dense = GridCentroid::new(301, 4).unwrap().defuzzify(&right_angle).unwrap().value();

    assert!((dense - 1.).abs() < 0.005, "{dense}");
    assert_eq!(cog(4).defuzzify(&right_angle).unwrap().value(), 0.);
}

#[test]
fn test_grid_centroid_single_point() {
    let single = [output("S", MembershipFunction::singleton(-2.5), 1.)];

    assert_eq!(GridCentroid::new(10, 4).unwrap().defuzzify(&single).unwrap().value(), -2.5);
}

#[test]
fn test_maximum_family() {
    let outputs = [output("S", MembershipFunction::trapezoidal(0., 2., 4., 6.), 0.5)];
    let run = |op| MaximumDefuzzifier::new(op, 4).unwrap().defuzzify(&outputs).unwrap().value();

    assert_eq!(run(MaximumOp::Mean), 3.);
    assert_eq!(run(MaximumOp::Largest), 4.);
    assert_eq!(run(MaximumOp::Smallest), 2.);
}

#[test]
fn test_maximum_degenerate() {
    let outputs = [output("S", MembershipFunction::triangular(0., 1., 2.), 0.)];

    assert!(matches!(
        MaximumDefuzzifier::new(MaximumOp::Mean, 4).unwrap().defuzzify(&outputs),
        Err(Error::DegenerateAggregate(_))
    ));
}
