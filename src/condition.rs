//! Rule antecedents as a small expression tree.

use crate::error::{Error, Result};
use crate::inputs::Inputs;
use crate::ops::{self, AndOp, OrOp};
use crate::unit_interval::UnitInterval;
use crate::variable::Proposition;

/// A tree of "variable is label" atoms joined by logic operators.
///
/// Each node owns its children. Combinators consume `self` and return a new
/// tree, nothing is mutated in place.
#[derive(Clone, Debug, PartialEq)]
pub enum Condition {
    Atom(Proposition),
    Not(Box<Condition>),
    And(Box<Condition>, Box<Condition>),
    Or(Box<Condition>, Box<Condition>),
}

impl From<Proposition> for Condition {
    fn from(prop: Proposition) -> Self {
        Condition::Atom(prop)
    }
}

impl Condition {
    pub fn and(self, rhs: impl Into<Condition>) -> Self {
        Condition::And(Box::new(self), Box::new(rhs.into()))
    }

    pub fn or(self, rhs: impl Into<Condition>) -> Self {
        Condition::Or(Box::new(self), Box::new(rhs.into()))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Condition::Not(Box::new(self))
    }

    /// Truth degree using min for AND and max for OR.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<UnitInterval> {
        self.evaluate_with(inputs, AndOp::Min, OrOp::Max)
    }

    pub fn evaluate_with(&self, inputs: &Inputs, and_op: AndOp, or_op: OrOp) -> Result<UnitInterval> {
        match self {
            Condition::Atom(prop) => {
                let variable = prop.variable().name();
                let value = inputs
                    .get(variable.as_str())
                    .ok_or_else(|| Error::MissingInput(variable.clone()))?;

                Ok(prop.degree(value))
            },
            Condition::Not(expr) => Ok(ops::not(expr.evaluate_with(inputs, and_op, or_op)?)),
            Condition::And(expr, expr2) => {
                let left = expr.evaluate_with(inputs, and_op, or_op)?;
                let right = expr2.evaluate_with(inputs, and_op, or_op)?;

                Ok(and_op.call(left, right))
            },
            Condition::Or(expr, expr2) => {
                let left = expr.evaluate_with(inputs, and_op, or_op)?;
                let right = expr2.evaluate_with(inputs, and_op, or_op)?;

                Ok(or_op.call(left, right))
            },
        }
    }

    /// Every atom in the tree, left to right.
    pub fn propositions(&self) -> Vec<&Proposition> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Condition, out: &mut Vec<&'p Proposition>) {
            match expr {
                Condition::Atom(prop) => out.push(prop),
                Condition::Not(expr) => parse(expr, out),
                Condition::And(expr, expr2) | Condition::Or(expr, expr2) => {
                    parse(expr, out);
                    parse(expr2, out);
                },
            }
        }

        parse(self, &mut props);

        props
    }
}

/// Builds a condition left to right from an initial atom. Each step wraps
/// everything accumulated so far.
#[derive(Clone, Debug)]
pub struct ConditionBuilder(Condition);

impl ConditionBuilder {
    pub fn new(initial: impl Into<Condition>) -> Self {
        Self(initial.into())
    }

    pub fn and(self, rhs: impl Into<Condition>) -> Self {
        Self(self.0.and(rhs))
    }

    pub fn or(self, rhs: impl Into<Condition>) -> Self {
        Self(self.0.or(rhs))
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self(self.0.not())
    }

    pub fn build(self) -> Condition {
        self.0
    }
}

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::membership::MembershipFunction;
#[cfg(test)]
use crate::set::FuzzySet;
#[cfg(test)]
use crate::variable::LinguisticVariable;

#[cfg(test)]
fn variable(name: &str, sets: &[(&str, f64, f64, f64)]) -> Arc<LinguisticVariable> {
    let sets = sets
        .iter()
        .map(|&(label, a, b, c)| FuzzySet::new(label, MembershipFunction::triangular(a, b, c).unwrap()).unwrap());

    Arc::new(LinguisticVariable::new(name, 0. ..=100., sets).unwrap())
}

#[cfg(test)]
fn fixtures() -> (Arc<LinguisticVariable>, Arc<LinguisticVariable>) {
    let temp = variable("temperature", &[("cold", 0., 0., 50.), ("hot", 50., 100., 100.)]);
    let humidity = variable("humidity", &[("dry", 0., 0., 40.), ("wet", 20., 100., 100.)]);

    (temp, humidity)
}

#[test]
fn test_single_atom_reproduces_membership() {
    let (temp, _) = fixtures();
    let cond = ConditionBuilder::new(temp.is("cold").unwrap()).build();
    let inputs = Inputs::new().with("temperature", 10.).unwrap();

    assert_eq!(cond.evaluate(&inputs).unwrap(), temp.evaluate("cold", 10.).unwrap());
    assert_eq!(cond.evaluate(&inputs).unwrap().value(), 0.8);
}

#[test]
fn test_and_or_not() {
    let (temp, humidity) = fixtures();
    let inputs = Inputs::new()
        .with("temperature", 75.)
        .unwrap()
        .with("humidity", 10.)
        .unwrap();
    let hot = temp.is("hot").unwrap();
    let dry = humidity.is("dry").unwrap();

    // hot = 0.5, dry = 0.75
    let both = ConditionBuilder::new(hot.clone()).and(dry.clone()).build();
    let either = ConditionBuilder::new(hot.clone()).or(dry.clone()).build();
    let neither = ConditionBuilder::new(hot).or(dry).not().build();

    assert_eq!(both.evaluate(&inputs).unwrap().value(), 0.5);
    assert_eq!(either.evaluate(&inputs).unwrap().value(), 0.75);
    assert_eq!(neither.evaluate(&inputs).unwrap().value(), 0.25);
}

#[test]
fn test_evaluate_with_alternative_ops() {
    let (temp, humidity) = fixtures();
    let inputs = Inputs::new()
        .with("temperature", 75.)
        .unwrap()
        .with("humidity", 10.)
        .unwrap();
    let cond = Condition::from(temp.is("hot").unwrap()).and(humidity.is("dry").unwrap());

    assert_eq!(
        cond.evaluate_with(&inputs, AndOp::Prod, OrOp::Max).unwrap().value(),
        0.375
    );
}

#[test]
fn test_missing_input() {
    let (temp, humidity) = fixtures();
    let cond = Condition::from(temp.is("hot").unwrap()).or(humidity.is("wet").unwrap());
    let inputs = Inputs::new().with("temperature", 75.).unwrap();

    assert_eq!(
        cond.evaluate(&inputs),
        Err(Error::MissingInput(crate::label::Label::new("humidity").unwrap()))
    );
}

#[test]
fn test_propositions_in_order() {
    let (temp, humidity) = fixtures();
    let cond = Condition::from(temp.is("hot").unwrap())
        .and(Condition::from(humidity.is("wet").unwrap()).not())
        .or(temp.is("cold").unwrap());
    let labels: Vec<_> = cond.propositions().iter().map(|p| p.label().as_str()).collect();

    assert_eq!(labels, vec!["hot", "wet", "cold"]);
}
