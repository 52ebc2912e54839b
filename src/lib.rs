//! Fuzzy rule evaluation with centroid defuzzification.
//!
//! Crisp inputs are fuzzified through [`LinguisticVariable`]s, combined by
//! [`Condition`] trees into a rule's firing strength, and the fired
//! [`FuzzyOutput`]s for a subject are reduced to one crisp [`Output`] by a
//! [`Defuzzifier`].
//!
//! ```
//! use std::sync::Arc;
//!
//! use fuzzy_infer::{
//!     CentroidDefuzzifier, Defuzzifier, FuzzyRule, FuzzySet, Inputs, LinguisticVariable, MembershipFunction,
//! };
//!
//! # fn main() -> fuzzy_infer::Result<()> {
//! let temperature = Arc::new(LinguisticVariable::new(
//!     "temperature",
//!     0. ..=40.,
//!     [
//!         FuzzySet::new("cold", MembershipFunction::trapezoidal(0., 0., 10., 20.)?)?,
//!         FuzzySet::new("warm", MembershipFunction::triangular(15., 25., 35.)?)?,
//!     ],
//! )?);
//! let heater = Arc::new(LinguisticVariable::new(
//!     "heater",
//!     0. ..=100.,
//!     [
//!         FuzzySet::new("low", MembershipFunction::triangular(0., 20., 40.)?)?,
//!         FuzzySet::new("high", MembershipFunction::triangular(60., 80., 100.)?)?,
//!     ],
//! )?);
//!
//! let cold = FuzzyRule::builder("cold", temperature.is("cold")?)?.then(heater.is("high")?).build();
//! let warm = FuzzyRule::builder("warm", temperature.is("warm")?)?.then(heater.is("low")?).build();
//!
//! let inputs = Inputs::new().with("temperature", 12.)?;
//! let mut fired = cold.evaluate(&inputs)?;
//! fired.extend(warm.evaluate(&inputs)?);
//!
//! let output = CentroidDefuzzifier::new(2)?.defuzzify(&fired)?;
//!
//! assert_eq!(output.subject().as_str(), "heater");
//! assert_eq!(output.value(), 80.);
//! # Ok(())
//! # }
//! ```

mod condition;
mod defuzz;
mod error;
mod inference;
mod inputs;
mod label;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod set;
mod unit_interval;
mod variable;

pub use condition::{Condition, ConditionBuilder};
pub use defuzz::{
    CentroidDefuzzifier, Defuzzifier, GridCentroid, MaximumDefuzzifier, MaximumOp, DEFAULT_PRECISION, MAX_PRECISION,
    MIN_PRECISION,
};
pub use error::{Error, Result};
pub use inference::{DegeneratePolicy, Inference};
pub use inputs::Inputs;
pub use label::Label;
pub use linspace::Linspace;
pub use membership::MembershipFunction;
pub use ops::{and, not, or, AndOp, OrOp};
pub use outputs::{FuzzyOutput, Output, Outputs};
pub use rules::{ConsequentBuilder, FuzzyRule, RuleBuilder, Rules};
pub use set::FuzzySet;
pub use unit_interval::UnitInterval;
pub use variable::{LinguisticVariable, Proposition};
