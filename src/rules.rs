use crate::condition::Condition;
use crate::error::Result;
use crate::inputs::Inputs;
use crate::label::Label;
use crate::ops::{AndOp, OrOp};
use crate::outputs::FuzzyOutput;
use crate::unit_interval::UnitInterval;
use crate::variable::Proposition;

/// "if antecedent then consequents", frozen once built.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyRule {
    label: Label,
    antecedent: Condition,
    consequents: Vec<Proposition>,
}

impl FuzzyRule {
    /// Start a rule from its initial antecedent.
    pub fn builder(label: impl AsRef<str>, antecedent: impl Into<Condition>) -> Result<RuleBuilder> {
        Ok(RuleBuilder {
            label: Label::new(label)?,
            antecedent: antecedent.into(),
        })
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn antecedent(&self) -> &Condition {
        &self.antecedent
    }

    pub fn consequents(&self) -> &[Proposition] {
        &self.consequents
    }

    /// Names of the variables the antecedent reads, first occurrence first.
    pub fn variables(&self) -> Vec<&Label> {
        let mut names: Vec<&Label> = Vec::new();

        for prop in self.antecedent.propositions() {
            let name = prop.variable().name();

            if !names.contains(&name) {
                names.push(name);
            }
        }

        names
    }

    pub fn firing_strength(&self, inputs: &Inputs) -> Result<UnitInterval> {
        self.antecedent.evaluate(inputs)
    }

    /// One output per consequent, all carrying the antecedent's strength.
    /// A strength of zero still yields outputs.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<Vec<FuzzyOutput>> {
        self.evaluate_with(inputs, AndOp::Min, OrOp::Max)
    }

    pub fn evaluate_with(&self, inputs: &Inputs, and_op: AndOp, or_op: OrOp) -> Result<Vec<FuzzyOutput>> {
        let strength = self.antecedent.evaluate_with(inputs, and_op, or_op)?;

        tracing::debug!(rule = %self.label, strength = strength.value(), "rule fired");

        Ok(self
            .consequents
            .iter()
            .map(|prop| FuzzyOutput::new(prop.variable().name().clone(), prop.fuzzy_set().clone(), strength))
            .collect())
    }
}

/// A rule with its antecedent under construction and no consequent yet.
#[derive(Clone, Debug)]
pub struct RuleBuilder {
    label: Label,
    antecedent: Condition,
}

impl RuleBuilder {
    pub fn and(self, rhs: impl Into<Condition>) -> Self {
        Self {
            antecedent: self.antecedent.and(rhs),
            ..self
        }
    }

    pub fn or(self, rhs: impl Into<Condition>) -> Self {
        Self {
            antecedent: self.antecedent.or(rhs),
            ..self
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self {
            antecedent: self.antecedent.not(),
            ..self
        }
    }

    /// Closes the antecedent and adds the first consequent.
    pub fn then(self, consequent: Proposition) -> ConsequentBuilder {
        ConsequentBuilder {
            label: self.label,
            antecedent: self.antecedent,
            consequents: vec![consequent],
        }
    }
}

/// A rule with at least one consequent, ready to build.
#[derive(Clone, Debug)]
pub struct ConsequentBuilder {
    label: Label,
    antecedent: Condition,
    consequents: Vec<Proposition>,
}

impl ConsequentBuilder {
    pub fn also(mut self, consequent: Proposition) -> Self {
        self.consequents.push(consequent);
        self
    }

    pub fn build(self) -> FuzzyRule {
        FuzzyRule {
            label: self.label,
            antecedent: self.antecedent,
            consequents: self.consequents,
        }
    }
}

/// An ordered rule base.
#[derive(Clone, Debug, Default)]
pub struct Rules(Vec<FuzzyRule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, rule: FuzzyRule) {
        self.0.push(rule);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FuzzyRule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<FuzzyRule> for Rules {
    fn from_iter<T: IntoIterator<Item = FuzzyRule>>(iter: T) -> Self {
        Rules(iter.into_iter().collect())
    }
}

impl<'r> IntoIterator for &'r Rules {
    type Item = &'r FuzzyRule;
    type IntoIter = std::slice::Iter<'r, FuzzyRule>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use crate::error::Error;
#[cfg(test)]
use crate::membership::MembershipFunction;
#[cfg(test)]
use crate::set::FuzzySet;
#[cfg(test)]
use crate::variable::LinguisticVariable;

#[cfg(test)]
fn tri(label: &str, a: f64, b: f64, c: f64) -> FuzzySet {
    FuzzySet::new(label, MembershipFunction::triangular(a, b, c).unwrap()).unwrap()
}

#[cfg(test)]
fn fan() -> (Arc<LinguisticVariable>, Arc<LinguisticVariable>, Arc<LinguisticVariable>) {
    let temp = LinguisticVariable::new(
        "temperature",
        0. ..=40.,
        [tri("cool", 0., 0., 20.), tri("warm", 10., 25., 40.)],
    )
    .unwrap();
    let occupancy = LinguisticVariable::new(
        "occupancy",
        0. ..=10.,
        [tri("empty", 0., 0., 4.), tri("busy", 2., 10., 10.)],
    )
    .unwrap();
    let fan = LinguisticVariable::new(
        "fan",
        0. ..=100.,
        [tri("slow", 0., 25., 50.), tri("fast", 50., 75., 100.)],
    )
    .unwrap();

    (Arc::new(temp), Arc::new(occupancy), Arc::new(fan))
}

#[test]
fn test_rule_outputs_carry_strength() {
    let (temp, occupancy, fan) = fan();
    let rule = FuzzyRule::builder("warm and busy", temp.is("warm").unwrap())
        .unwrap()
        .and(occupancy.is("busy").unwrap())
        .then(fan.is("fast").unwrap())
        .build();
    let inputs = Inputs::new()
        .with("temperature", 25.)
        .unwrap()
        .with("occupancy", 6.)
        .unwrap();
    let outputs = rule.evaluate(&inputs).unwrap();

    assert_eq!(outputs.len(), 1);
    assert_eq!(outputs[0].subject().as_str(), "fan");
    assert_eq!(outputs[0].output_function(), fan.get("fast").unwrap());
    assert_eq!(outputs[0].firing_strength().value(), 0.5);
}

#[test]
fn test_zero_strength_still_yields_outputs() {
    let (temp, _, fan) = fan();
    let rule = FuzzyRule::builder("cool", temp.is("cool").unwrap())
        .unwrap()
        .then(fan.is("slow").unwrap())
        .also(fan.is("fast").unwrap())
        .build();
    let inputs = Inputs::new().with("temperature", 35.).unwrap();
    let outputs = rule.evaluate(&inputs).unwrap();

    assert_eq!(outputs.len(), 2);
    assert!(outputs.iter().all(|o| o.firing_strength() == UnitInterval::ZERO));
    assert_eq!(outputs[0].output_function().label().as_str(), "slow");
    assert_eq!(outputs[1].output_function().label().as_str(), "fast");
}

#[test]
fn test_rule_missing_input() {
    let (temp, occupancy, fan) = fan();
    let rule = FuzzyRule::builder("either", temp.is("warm").unwrap())
        .unwrap()
        .or(occupancy.is("busy").unwrap())
        .then(fan.is("fast").unwrap())
        .build();
    let inputs = Inputs::new().with("temperature", 25.).unwrap();

    assert!(matches!(rule.evaluate(&inputs), Err(Error::MissingInput(name)) if name.as_str() == "occupancy"));
}

#[test]
fn test_rule_variables() {
    let (temp, occupancy, fan) = fan();
    let rule = FuzzyRule::builder("mixed", temp.is("warm").unwrap())
        .unwrap()
        .and(occupancy.is("busy").unwrap())
        .or(temp.is("cool").unwrap())
        .not()
        .then(fan.is("slow").unwrap())
        .build();
    let names: Vec<_> = rule.variables().into_iter().map(Label::as_str).collect();

    assert_eq!(names, vec!["temperature", "occupancy"]);
    assert_eq!(rule.label().as_str(), "mixed");
    assert_eq!(rule.consequents().len(), 1);
}

#[test]
fn test_rules_collection() {
    let (temp, _, fan) = fan();
    let mut rules = Rules::with_capacity(2);

    assert!(rules.is_empty());

    rules.add(
        FuzzyRule::builder("a", temp.is("warm").unwrap())
            .unwrap()
            .then(fan.is("fast").unwrap())
            .build(),
    );
    rules.add(
        FuzzyRule::builder("b", temp.is("cool").unwrap())
            .unwrap()
            .then(fan.is("slow").unwrap())
            .build(),
    );

    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules.iter().map(|r| r.label().as_str()).collect::<Vec<_>>(),
        vec!["a", "b"]
    );
    assert!(FuzzyRule::builder(" ", temp.is("warm").unwrap()).is_err());
}
