//! Property tests for the logic operators, membership functions and the
//! centroid defuzzifier.

use std::sync::Arc;

use fuzzy_infer::{
    and, not, or, AndOp, CentroidDefuzzifier, ConditionBuilder, Defuzzifier, FuzzyOutput, FuzzySet, Inputs, Label,
    LinguisticVariable, MembershipFunction, OrOp, UnitInterval,
};
use proptest::prelude::*;

fn unit() -> impl Strategy<Value = UnitInterval> {
    (0.0..=1.0f64).prop_map(|v| UnitInterval::new(v).unwrap())
}

fn sorted_params(n: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1000.0..1000.0f64, n).prop_map(|mut v| {
        v.sort_by(f64::total_cmp);
        v
    })
}

fn any_function() -> impl Strategy<Value = MembershipFunction> {
    prop_oneof![
        (-1000.0..1000.0f64).prop_map(|x| MembershipFunction::singleton(x).unwrap()),
        sorted_params(3).prop_map(|p| MembershipFunction::triangular(p[0], p[1], p[2]).unwrap()),
        sorted_params(4).prop_map(|p| MembershipFunction::trapezoidal(p[0], p[1], p[2], p[3]).unwrap()),
        sorted_params(2).prop_map(|p| MembershipFunction::trapezoidal_open_right(p[0], p[1]).unwrap()),
    ]
}

proptest! {
    #[test]
    fn test_not_is_involutive(a in unit()) {
        prop_assert!((not(not(a)).value() - a.value()).abs() < 1e-12);
    }

    #[test]
    fn test_not_reverses_order(a in unit(), b in unit()) {
        if a <= b {
            prop_assert!(not(a) >= not(b));
        }
    }

    #[test]
    fn test_and_or_bounds(a in unit(), b in unit()) {
        prop_assert!(and(a, b) <= a && and(a, b) <= b);
        prop_assert!(or(a, b) >= a && or(a, b) >= b);
    }

    #[test]
    fn test_and_or_commutative_associative(a in unit(), b in unit(), c in unit()) {
        prop_assert_eq!(and(a, b), and(b, a));
        prop_assert_eq!(or(a, b), or(b, a));
        prop_assert_eq!(and(and(a, b), c), and(a, and(b, c)));
        prop_assert_eq!(or(or(a, b), c), or(a, or(b, c)));
        prop_assert_eq!(and(a, a), a);
        prop_assert_eq!(or(a, a), a);
    }

    #[test]
    fn test_alternative_ops_stay_in_range(a in unit(), b in unit()) {
        for op in [AndOp::Min, AndOp::Prod, AndOp::BoundedProd, AndOp::DrasticProd] {
            let v = op.call(a, b);
            prop_assert!(v <= a.max(b), "{:?}", op);
        }
        for op in [OrOp::Max, OrOp::ProbOr, OrOp::BoundedSum, OrOp::DrasticSum] {
            let v = op.call(a, b);
            prop_assert!(v >= a.min(b), "{:?}", op);
        }
    }

    #[test]
    fn test_degree_in_unit_interval(f in any_function(), x in prop::num::f64::ANY) {
        let degree = f.degree(x).value();
        prop_assert!((0.0..=1.0).contains(&degree), "{:?} at {} gave {}", f, x, degree);
    }

    #[test]
    fn test_degree_far_outside_support(f in any_function()) {
        let expected_right = match f {
            MembershipFunction::TrapezoidalOpenRight { .. } => 1.,
            _ => 0.,
        };

        prop_assert_eq!(f.degree(-1e9).value(), 0.);
        prop_assert_eq!(f.degree(1e9).value(), expected_right);
    }

    #[test]
    fn test_knots_ascending(f in any_function()) {
        let knots = f.knots();
        prop_assert!(knots.windows(2).all(|w| w[0].0 <= w[1].0));
        for (x, degree) in knots {
            prop_assert_eq!(f.degree(x).value(), degree);
        }
    }

    #[test]
    fn test_triangle_apex_and_feet(p in sorted_params(3)) {
        prop_assume!(p[0] < p[1] && p[1] < p[2]);
        let tri = MembershipFunction::triangular(p[0], p[1], p[2]).unwrap();

        prop_assert_eq!(tri.degree(p[1]).value(), 1.);
        prop_assert_eq!(tri.degree(p[0]).value(), 0.);
        prop_assert_eq!(tri.degree(p[2]).value(), 0.);
    }

    #[test]
    fn test_symmetric_triangle_centroid_is_apex(
        center in -100.0..100.0f64,
        width in 0.1..50.0f64,
        strength in 0.01..=1.0f64,
    ) {
        let function = MembershipFunction::triangular(center - width, center, center + width).unwrap();
        let output = FuzzyOutput::new(
            Label::new("S").unwrap(),
            FuzzySet::new("peak", function).unwrap(),
            UnitInterval::new(strength).unwrap(),
        );
        let value = CentroidDefuzzifier::new(4).unwrap().defuzzify(&[output]).unwrap().value();

        prop_assert!((value - center).abs() < 1e-4, "{} vs {}", value, center);
    }

    #[test]
    fn test_single_atom_round_trip(x in -20.0..60.0f64) {
        let warm = MembershipFunction::triangular(10., 20., 30.).unwrap();
        let temp = Arc::new(
            LinguisticVariable::new("temperature", -10. ..=50., [FuzzySet::new("warm", warm).unwrap()]).unwrap(),
        );
        let cond = ConditionBuilder::new(temp.is("warm").unwrap()).build();
        let inputs = Inputs::new().with("temperature", x).unwrap();

        prop_assert_eq!(cond.evaluate(&inputs).unwrap(), temp.evaluate("warm", x).unwrap());
    }
}
