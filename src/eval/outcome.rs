use crate::engine::EngineFailure;
use crate::value::{RuleValue, ValueKind};
use core::fmt;

/// Message recorded for a rule that evaluated to `false`.
pub const FALSE_RESULT_MESSAGE: &str = "Rule evaluated to 'false'";

/// How a single rule fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule evaluated to `true`.
    Passed,

    /// The rule evaluated to `false`.
    FailedAssertion,

    /// The rule evaluated to something other than a boolean.
    WrongResultType(ValueKind),

    /// The engine could not evaluate the rule.
    EvaluationFailed(String),
}

impl RuleOutcome {
    /// Classifies the engine's result for one rule.
    #[must_use]
    pub fn classify(result: Result<RuleValue, EngineFailure>) -> Self {
        match result {
            Ok(RuleValue::Boolean(true)) => Self::Passed,
            Ok(RuleValue::Boolean(false)) => Self::FailedAssertion,
            Ok(other) => Self::WrongResultType(other.kind()),
            Err(failure) => Self::EvaluationFailed(failure.message().to_string()),
        }
    }

    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    /// The error message to report, or `None` if the rule passed.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Passed => None,
            Self::FailedAssertion => Some(FALSE_RESULT_MESSAGE.to_string()),
            Self::WrongResultType(kind) => Some(format!("Result type of rule was {kind}, but must be Boolean.")),
            Self::EvaluationFailed(message) => Some(message.clone()),
        }
    }
}

impl fmt::Display for RuleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Passed => write!(f, "passed"),
            Self::FailedAssertion => write!(f, "failed: evaluated to false"),
            Self::WrongResultType(kind) => write!(f, "failed: result was {kind}"),
            Self::EvaluationFailed(message) => write!(f, "error: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(RuleOutcome::classify(Ok(RuleValue::Boolean(true))), RuleOutcome::Passed);
        assert_eq!(RuleOutcome::classify(Ok(RuleValue::Boolean(false))), RuleOutcome::FailedAssertion);
        assert_eq!(
            RuleOutcome::classify(Ok(RuleValue::Null)),
            RuleOutcome::WrongResultType(ValueKind::Null)
        );
        assert_eq!(
            RuleOutcome::classify(Err(EngineFailure::new("boom"))),
            RuleOutcome::EvaluationFailed("boom".into())
        );
    }

    #[test]
    fn test_messages() {
        assert_eq!(RuleOutcome::Passed.message(), None);
        insta::assert_snapshot!(RuleOutcome::FailedAssertion.message().unwrap(), @"Rule evaluated to 'false'");
        insta::assert_snapshot!(
            RuleOutcome::WrongResultType(ValueKind::String).message().unwrap(),
            @"Result type of rule was String, but must be Boolean."
        );
        assert_eq!(RuleOutcome::EvaluationFailed("bad".into()).message().as_deref(), Some("bad"));
    }
}
