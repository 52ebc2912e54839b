//! Error types for fuzzy inference.

use thiserror::Error;

use crate::label::Label;

/// Result type for fuzzy inference operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Every failure is raised where the violation happens and is fatal to the
/// evaluation in progress.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed shape parameters, non-finite numbers or an out of range setting.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A linguistic variable has no fuzzy set with the requested label.
    #[error("Unknown label `{label}` on variable `{variable}`")]
    UnknownLabel { variable: Label, label: String },

    /// A condition references a variable with no crisp input.
    #[error("Missing input for variable `{0}`")]
    MissingInput(Label),

    /// A defuzzifier was handed no fuzzy outputs.
    #[error("Cannot defuzzify an empty collection of outputs")]
    EmptyInput,

    /// A defuzzifier was handed outputs for more than one subject.
    #[error("Inconsistent subjects: expected `{expected}`, found `{found}`")]
    InconsistentSubject { expected: Label, found: Label },

    /// The aggregated conclusion has zero total membership.
    #[error("Aggregated membership for `{0}` is zero everywhere")]
    DegenerateAggregate(Label),

    /// The crisp value overflowed, typically from abscissas near `f64::MAX`.
    #[error("Defuzzified value for `{0}` is not finite")]
    NonFiniteResult(Label),
}

impl Error {
    /// Create an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}
