use std::collections::HashSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::label::Label;
use crate::set::FuzzySet;
use crate::unit_interval::UnitInterval;

/// A named group of fuzzy sets over a bounded domain, e.g. `temperature`
/// with `cold`, `warm` and `hot`.
///
/// Immutable once built. Conditions and rules hold it through an [`Arc`],
/// so one variable can back any number of rules across threads.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "VariableFields")
)]
pub struct LinguisticVariable {
    name: Label,
    sets: Vec<FuzzySet>,
    min_u: f64,
    max_u: f64,
}

/// Unchecked wire form of [`LinguisticVariable`], same field names.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct VariableFields {
    name: Label,
    sets: Vec<FuzzySet>,
    min_u: f64,
    max_u: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<VariableFields> for LinguisticVariable {
    type Error = Error;

    fn try_from(fields: VariableFields) -> Result<Self> {
        Self::new(fields.name, fields.min_u..=fields.max_u, fields.sets)
    }
}

impl LinguisticVariable {
    /// Fails if the domain is empty or not finite, or if two sets share a label.
    ///
    /// Sets reaching outside the domain are accepted, callers are expected to
    /// keep them inside.
    pub fn new(
        name: impl AsRef<str>,
        universe_range: RangeInclusive<f64>,
        sets: impl IntoIterator<Item = FuzzySet>,
    ) -> Result<Self> {
        let name = Label::new(name)?;
        let min_u = *universe_range.start();
        let max_u = *universe_range.end();

        if !(min_u.is_finite() && max_u.is_finite() && min_u < max_u) {
            return Err(Error::invalid_parameter(format!(
                "domain of `{name}` must be finite with min < max, got {min_u}..={max_u}"
            )));
        }

        let sets: Vec<FuzzySet> = sets.into_iter().collect();
        let mut seen = HashSet::with_capacity(sets.len());

        for set in &sets {
            if !seen.insert(set.label()) {
                return Err(Error::invalid_parameter(format!(
                    "duplicate label `{}` on variable `{name}`",
                    set.label()
                )));
            }

            let outside = set.knots().iter().any(|(x, _)| *x < min_u || *x > max_u);

            if outside {
                tracing::debug!(variable = %name, set = %set.label(), "fuzzy set reaches outside of the domain");
            }
        }

        Ok(Self {
            name,
            sets,
            min_u,
            max_u,
        })
    }

    pub fn name(&self) -> &Label {
        &self.name
    }

    pub fn sets(&self) -> &[FuzzySet] {
        &self.sets
    }

    pub fn domain(&self) -> RangeInclusive<f64> {
        self.min_u..=self.max_u
    }

    /// Case sensitive lookup of a set by label.
    pub fn get(&self, label: &str) -> Option<&FuzzySet> {
        self.position(label).map(|i| &self.sets[i])
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.sets.iter().position(|set| set.label().as_str() == label)
    }

    fn unknown_label(&self, label: &str) -> Error {
        Error::UnknownLabel {
            variable: self.name.clone(),
            label: label.to_owned(),
        }
    }

    /// The proposition "`self` is `label`".
    pub fn is(self: &Arc<Self>, label: &str) -> Result<Proposition> {
        let index = self.position(label).ok_or_else(|| self.unknown_label(label))?;

        Ok(Proposition {
            variable: Arc::clone(self),
            index,
        })
    }

    /// Fuzzifies `value` against the set named `label`.
    pub fn evaluate(&self, label: &str, value: f64) -> Result<UnitInterval> {
        self.get(label)
            .map(|set| set.degree(value))
            .ok_or_else(|| self.unknown_label(label))
    }
}

/// "variable is label", with the label already resolved against the variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Proposition {
    variable: Arc<LinguisticVariable>,
    // Valid for the lifetime of the (immutable) variable
    index: usize,
}

impl Proposition {
    pub fn variable(&self) -> &Arc<LinguisticVariable> {
        &self.variable
    }

    pub fn label(&self) -> &Label {
        self.fuzzy_set().label()
    }

    pub fn fuzzy_set(&self) -> &FuzzySet {
        &self.variable.sets[self.index]
    }

    pub fn degree(&self, value: f64) -> UnitInterval {
        self.fuzzy_set().degree(value)
    }
}

#[cfg(test)]
fn temperature() -> Arc<LinguisticVariable> {
    use crate::membership::MembershipFunction;

    let sets = [
        ("cold", MembershipFunction::trapezoidal(-10., -10., 5., 15.)),
        ("warm", MembershipFunction::triangular(10., 20., 30.)),
        ("hot", MembershipFunction::trapezoidal_open_right(25., 35.)),
    ]
    .into_iter()
    .map(|(label, function)| FuzzySet::new(label, function.unwrap()).unwrap());

    Arc::new(LinguisticVariable::new("temperature", -10. ..=50., sets).unwrap())
}

#[test]
fn test_variable_lookup() {
    let temp = temperature();

    assert_eq!(temp.name().as_str(), "temperature");
    assert_eq!(temp.domain(), -10. ..=50.);
    assert_eq!(temp.sets().len(), 3);
    assert!(temp.get("warm").is_some());
    assert!(temp.get("Warm").is_none());
}

#[test]
fn test_variable_is() {
    let temp = temperature();
    let warm = temp.is("warm").unwrap();

    assert_eq!(warm.label().as_str(), "warm");
    assert_eq!(warm.variable().name().as_str(), "temperature");
    assert_eq!(warm.degree(15.).value(), 0.5);
    assert_eq!(
        temp.is("freezing").unwrap_err(),
        Error::UnknownLabel {
            variable: Label::new("temperature").unwrap(),
            label: "freezing".to_owned(),
        }
    );
}

#[test]
fn test_variable_evaluate() {
    let temp = temperature();

    assert_eq!(temp.evaluate("cold", 0.).unwrap().value(), 1.);
    assert_eq!(temp.evaluate("cold", 10.).unwrap().value(), 0.5);
    assert_eq!(temp.evaluate("hot", 100.).unwrap().value(), 1.);
    assert!(matches!(temp.evaluate("tepid", 0.), Err(Error::UnknownLabel { .. })));
}

#[test]
fn test_variable_validation() {
    use crate::membership::MembershipFunction;

    let f = MembershipFunction::singleton(1.).unwrap();
    let dup = [FuzzySet::new("a", f).unwrap(), FuzzySet::new("a", f).unwrap()];

    assert!(LinguisticVariable::new("x", 0. ..=2., dup).is_err());
    assert!(LinguisticVariable::new("x", 2. ..=2., []).is_err());
    assert!(LinguisticVariable::new("x", 0. ..=f64::INFINITY, []).is_err());
    assert!(LinguisticVariable::new(" ", 0. ..=1., []).is_err());
}

#[cfg(feature = "serde")]
#[test]
fn test_deserialize_validates() {
    let json = serde_json::to_string(&*temperature()).unwrap();
    let back: LinguisticVariable = serde_json::from_str(&json).unwrap();

    assert_eq!(back, *temperature());

    let dup = r#"{"name":"x","sets":[{"label":"a","function":{"Singleton":1.0}},{"label":"a","function":{"Singleton":1.0}}],"min_u":0.0,"max_u":2.0}"#;
    let inverted = r#"{"name":"x","sets":[],"min_u":2.0,"max_u":0.0}"#;

    assert!(serde_json::from_str::<LinguisticVariable>(dup).is_err());
    assert!(serde_json::from_str::<LinguisticVariable>(inverted).is_err());
}
