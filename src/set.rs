use crate::error::Result;
use crate::label::Label;
use crate::membership::MembershipFunction;
use crate::unit_interval::UnitInterval;

/// A labelled membership function: the meaning of "variable is *label*".
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuzzySet {
    label: Label,
    function: MembershipFunction,
}

impl FuzzySet {
    pub fn new(label: impl AsRef<str>, function: MembershipFunction) -> Result<Self> {
        Ok(Self {
            label: Label::new(label)?,
            function,
        })
    }

    pub fn label(&self) -> &Label {
        &self.label
    }

    pub fn function(&self) -> &MembershipFunction {
        &self.function
    }

    pub fn degree(&self, x: f64) -> UnitInterval {
        self.function.degree(x)
    }

    pub fn knots(&self) -> Vec<(f64, f64)> {
        self.function.knots()
    }
}

#[test]
fn test_fuzzy_set_equality() {
    let warm = MembershipFunction::triangular(15., 22., 30.).unwrap();
    let hot = MembershipFunction::triangular(25., 35., 45.).unwrap();

    assert_eq!(FuzzySet::new("warm", warm).unwrap(), FuzzySet::new(" warm", warm).unwrap());
    assert_ne!(FuzzySet::new("warm", warm).unwrap(), FuzzySet::new("warm", hot).unwrap());
    assert_ne!(FuzzySet::new("warm", warm).unwrap(), FuzzySet::new("hot", warm).unwrap());
    assert!(FuzzySet::new("", warm).is_err());
}
