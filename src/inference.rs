use std::collections::BTreeMap;
use std::sync::Arc;

use crate::defuzz::{CentroidDefuzzifier, Defuzzifier};
use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::label::Label;
use crate::math::round_to;
use crate::ops::{AndOp, OrOp};
use crate::outputs::{FuzzyOutput, Output, Outputs};
use crate::rules::Rules;
use crate::unit_interval::UnitInterval;
use crate::variable::LinguisticVariable;

/// What to report for a subject whose aggregated conclusion is empty.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DegeneratePolicy {
    /// Propagate [`Error::DegenerateAggregate`]
    #[default]
    Fail,
    /// Report the midpoint of the subject variable's domain
    DomainMidpoint,
}

/// Evaluates a rule base against crisp inputs and defuzzifies every
/// concluded subject.
#[derive(Clone, Debug, Default)]
pub struct Inference<D = CentroidDefuzzifier> {
    and_op: AndOp,
    or_op: OrOp,
    defuzzifier: D,
    on_degenerate: DegeneratePolicy,
}

impl<D: Defuzzifier> Inference<D> {
    pub fn new(and_op: AndOp, or_op: OrOp, defuzzifier: D, on_degenerate: DegeneratePolicy) -> Self {
        Self {
            and_op,
            or_op,
            defuzzifier,
            on_degenerate,
        }
    }

    pub fn defuzzifier(&self) -> &D {
        &self.defuzzifier
    }

    /// Fails on the first rule or subject that fails; no partial outputs.
    pub fn eval(&self, rules: &Rules, inputs: &Inputs) -> Result<Outputs> {
        let mut collected: BTreeMap<Label, (Arc<LinguisticVariable>, Vec<FuzzyOutput>)> = BTreeMap::new();
        let mut max_firing_strength = UnitInterval::ZERO;

        for rule in rules {
            let fired = rule.evaluate_with(inputs, self.and_op, self.or_op)?;

            for (output, prop) in fired.into_iter().zip(rule.consequents()) {
                max_firing_strength = max_firing_strength.max(output.firing_strength());
                collected
                    .entry(output.subject().clone())
                    .or_insert_with(|| (Arc::clone(prop.variable()), Vec::new()))
                    .1
                    .push(output);
            }
        }

        let mut defuzzificated = Vec::with_capacity(collected.len());

        for (subject, (variable, outputs)) in collected {
            let output = match self.defuzzifier.defuzzify(&outputs) {
                Err(Error::DegenerateAggregate(_)) if self.on_degenerate == DegeneratePolicy::DomainMidpoint => {
                    let domain = variable.domain();
                    let midpoint = (domain.start() + domain.end()) / 2.;

                    tracing::warn!(subject = %subject, midpoint, "no rule concludes anything, using domain midpoint");

                    Output::new(subject, round_to(midpoint, self.defuzzifier.precision()))
                },
                result => result?,
            };

            defuzzificated.push(output);
        }

        Ok(Outputs::new(defuzzificated, max_firing_strength))
    }
}

#[cfg(test)]
use crate::membership::MembershipFunction;
#[cfg(test)]
use crate::rules::FuzzyRule;
#[cfg(test)]
use crate::set::FuzzySet;

#[cfg(test)]
fn var(name: &str, range: std::ops::RangeInclusive<f64>, sets: Vec<(&str, Result<MembershipFunction>)>) -> Arc<LinguisticVariable> {
    let sets = sets
        .into_iter()
        .map(|(label, function)| FuzzySet::new(label, function.unwrap()).unwrap());

    Arc::new(LinguisticVariable::new(name, range, sets).unwrap())
}

#[cfg(test)]
fn bank_loan() -> (Rules, Arc<LinguisticVariable>) {
    let score = var(
        "score",
        150. ..=200.,
        vec![
            ("high", MembershipFunction::trapezoidal_open_right(175., 190.)),
            ("low", MembershipFunction::trapezoidal(150., 150., 155., 175.)),
        ],
    );
    let ratio = var(
        "ratio",
        0.1..=1.,
        vec![
            ("good", MembershipFunction::trapezoidal(0.1, 0.1, 0.3, 0.42)),
            ("bad", MembershipFunction::trapezoidal_open_right(0.44, 0.7)),
        ],
    );
    let credit = var(
        "credit",
        0. ..=10.,
        vec![
            ("good", MembershipFunction::trapezoidal(0., 0., 2., 5.)),
            ("bad", MembershipFunction::trapezoidal_open_right(5., 8.)),
        ],
    );
    let decision = var(
        "decision",
        0. ..=10.,
        vec![
            ("approve", MembershipFunction::trapezoidal_open_right(5., 8.)),
            ("reject", MembershipFunction::trapezoidal(0., 0., 2., 5.)),
        ],
    );
    let mut rules = Rules::new();

    rules.add(
        FuzzyRule::builder("approve", score.is("high").unwrap())
            .unwrap()
            .and(ratio.is("good").unwrap())
            .and(credit.is("good").unwrap())
            .then(decision.is("approve").unwrap())
            .build(),
    );
    rules.add(
        FuzzyRule::builder("reject", score.is("low").unwrap())
            .unwrap()
            .and(ratio.is("bad").unwrap())
            .or(credit.is("bad").unwrap())
            .then(decision.is("reject").unwrap())
            .build(),
    );

    (rules, decision)
}

#[cfg(test)]
fn loan_inputs(score: f64, ratio: f64, credit: f64) -> Inputs {
    Inputs::new()
        .with("score", score)
        .unwrap()
        .with("ratio", ratio)
        .unwrap()
        .with("credit", credit)
        .unwrap()
}

#[test]
fn test_bank_loan() {
    let (rules, _) = bank_loan();
    let model = Inference::<CentroidDefuzzifier>::default();
    let outputs = model.eval(&rules, &loan_inputs(190., 0.39, 1.5)).unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs.value("decision"), Some(8.));
    assert!((outputs.max_firing_strength().value() - 0.25).abs() < 1e-9);
}

#[test]
fn test_degenerate_fails_by_default() {
    let (rules, _) = bank_loan();
    let model = Inference::<CentroidDefuzzifier>::default();

    assert_eq!(
        model.eval(&rules, &loan_inputs(160., 0.43, 3.)),
        Err(Error::DegenerateAggregate(Label::new("decision").unwrap()))
    );
}

#[test]
fn test_degenerate_domain_midpoint() {
    let (rules, decision) = bank_loan();
    let model = Inference::new(
        AndOp::Min,
        OrOp::Max,
        CentroidDefuzzifier::new(2).unwrap(),
        DegeneratePolicy::DomainMidpoint,
    );
    let outputs = model.eval(&rules, &loan_inputs(160., 0.43, 3.)).unwrap();

    assert_eq!(decision.domain(), 0. ..=10.);
    assert_eq!(outputs.value("decision"), Some(5.));
    assert_eq!(outputs.max_firing_strength(), UnitInterval::ZERO);
}

#[test]
fn test_missing_input_aborts() {
    let (rules, _) = bank_loan();
    let model = Inference::<CentroidDefuzzifier>::default();
    let inputs = Inputs::new().with("score", 190.).unwrap();

    assert!(matches!(model.eval(&rules, &inputs), Err(Error::MissingInput(_))));
}

#[test]
fn test_empty_rule_base() {
    let model = Inference::<CentroidDefuzzifier>::default();
    let outputs = model.eval(&Rules::new(), &Inputs::new()).unwrap();

    assert!(outputs.is_empty());
    assert_eq!(outputs.max_firing_strength(), UnitInterval::ZERO);
}
