//! The value model shared by contexts, extension functions, and evaluation results.

mod evaluation_context;
mod rule_value;
mod value_kind;

pub use evaluation_context::EvaluationContext;
pub use rule_value::{Number, RuleValue};
pub use value_kind::ValueKind;

/// Returned when a context is built from JSON that is not an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("evaluation context must be a Mapping, got {0}")]
pub struct NotAnObject(pub ValueKind);
