use std::borrow::Borrow;
use std::fmt;

use crate::error::{Error, Result};

/// Names a subject (variable) or a fuzzy set category. Always trimmed and
/// never empty.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct Label(String);

impl Label {
    pub fn new(name: impl AsRef<str>) -> Result<Self> {
        let trimmed = name.as_ref().trim();

        if trimmed.is_empty() {
            return Err(Error::invalid_parameter("label must not be empty"));
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Label {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by Label be queried with &str.
impl Borrow<str> for Label {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for Label {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<String> for Label {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Label> for String {
    fn from(label: Label) -> Self {
        label.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[test]
fn test_label_trims() {
    let label = Label::new("  warm \t").unwrap();

    assert_eq!(label.as_str(), "warm");
    assert_eq!(label, Label::try_from("warm").unwrap());
    assert_eq!(label.to_string(), "warm");
}

#[test]
fn test_label_rejects_blank() {
    assert!(matches!(Label::new(""), Err(Error::InvalidParameter(_))));
    assert!(matches!(Label::new("   "), Err(Error::InvalidParameter(_))));
}

#[test]
fn test_label_is_case_sensitive() {
    assert_ne!(Label::new("Warm").unwrap(), Label::new("warm").unwrap());
}
