use std::collections::HashMap;

use crate::error::Result;
use crate::label::Label;

/// Crisp input values keyed by variable name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(HashMap<Label, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    /// Replaces any earlier value for the same variable.
    pub fn insert(&mut self, variable: impl AsRef<str>, value: f64) -> Result<()> {
        self.0.insert(Label::new(variable)?, value);

        Ok(())
    }

    pub fn with(mut self, variable: impl AsRef<str>, value: f64) -> Result<Self> {
        self.insert(variable, value)?;

        Ok(self)
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.0.get(variable).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Label, f64)> for Inputs {
    fn from_iter<T: IntoIterator<Item = (Label, f64)>>(iter: T) -> Self {
        Inputs(iter.into_iter().collect())
    }
}

#[test]
fn test_inputs() {
    let inputs = Inputs::new().with("temperature", 21.5).unwrap().with(" humidity ", 0.4).unwrap();

    assert_eq!(inputs.len(), 2);
    assert_eq!(inputs.get("temperature"), Some(21.5));
    assert_eq!(inputs.get("humidity"), Some(0.4));
    assert_eq!(inputs.get("pressure"), None);
    assert!(Inputs::new().with("", 1.).is_err());
}
