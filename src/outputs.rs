use std::collections::BTreeMap;

use crate::label::Label;
use crate::set::FuzzySet;
use crate::unit_interval::UnitInterval;

/// One fired consequent: the set a subject was concluded to be in, and how
/// strongly.
#[derive(Clone, Debug, PartialEq)]
pub struct FuzzyOutput {
    subject: Label,
    output_function: FuzzySet,
    firing_strength: UnitInterval,
}

impl FuzzyOutput {
    pub fn new(subject: Label, output_function: FuzzySet, firing_strength: UnitInterval) -> Self {
        Self {
            subject,
            output_function,
            firing_strength,
        }
    }

    pub fn subject(&self) -> &Label {
        &self.subject
    }

    pub fn output_function(&self) -> &FuzzySet {
        &self.output_function
    }

    pub fn firing_strength(&self) -> UnitInterval {
        self.firing_strength
    }

    /// Membership at `x` after implication clipping: `min(degree(x), strength)`.
    pub fn clipped_degree(&self, x: f64) -> UnitInterval {
        self.output_function.degree(x).min(self.firing_strength)
    }
}

/// A crisp, defuzzified value for one subject.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Output {
    subject: Label,
    value: f64,
}

impl Output {
    /// For [`Defuzzifier`](crate::Defuzzifier) implementations; `value` is
    /// taken as already rounded.
    pub fn new(subject: Label, value: f64) -> Self {
        Self { subject, value }
    }

    pub fn subject(&self) -> &Label {
        &self.subject
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

/// The result of running an inference over a rule base.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Outputs {
    defuzzificated: BTreeMap<Label, Output>,
    max_firing_strength: UnitInterval,
}

impl Outputs {
    pub(crate) fn new(outputs: impl IntoIterator<Item = Output>, max_firing_strength: UnitInterval) -> Self {
        Self {
            defuzzificated: outputs.into_iter().map(|o| (o.subject.clone(), o)).collect(),
            max_firing_strength,
        }
    }

    pub fn get(&self, subject: &str) -> Option<&Output> {
        self.defuzzificated.get(subject)
    }

    pub fn value(&self, subject: &str) -> Option<f64> {
        self.get(subject).map(Output::value)
    }

    /// Ordered by subject
    pub fn iter(&self) -> impl Iterator<Item = &Output> {
        self.defuzzificated.values()
    }

    pub fn len(&self) -> usize {
        self.defuzzificated.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defuzzificated.is_empty()
    }

    /// Strongest antecedent across every evaluated rule.
    pub fn max_firing_strength(&self) -> UnitInterval {
        self.max_firing_strength
    }
}

#[test]
fn test_clipped_degree() {
    use crate::membership::MembershipFunction;

    let set = FuzzySet::new("mid", MembershipFunction::triangular(0., 1., 2.).unwrap()).unwrap();
    let output = FuzzyOutput::new(Label::new("speed").unwrap(), set, UnitInterval::new(0.5).unwrap());

    assert_eq!(output.clipped_degree(1.).value(), 0.5);
    assert_eq!(output.clipped_degree(0.25).value(), 0.25);
    assert_eq!(output.clipped_degree(5.).value(), 0.);
}

#[test]
fn test_outputs_lookup() {
    let outputs = Outputs::new(
        [
            Output::new(Label::new("speed").unwrap(), 3.5),
            Output::new(Label::new("angle").unwrap(), -1.),
        ],
        UnitInterval::ONE,
    );

    assert_eq!(outputs.len(), 2);
    assert_eq!(outputs.value("speed"), Some(3.5));
    assert_eq!(outputs.value("torque"), None);
    assert_eq!(
        outputs.iter().map(|o| o.subject().as_str()).collect::<Vec<_>>(),
        vec!["angle", "speed"]
    );
}
