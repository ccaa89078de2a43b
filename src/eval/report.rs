use super::{EvaluationError, RuleOutcome};
use core::fmt;
use serde::Serialize;

/// The ordered errors collected while evaluating one batch of rules.
///
/// Errors are appended in rule order during evaluation and are read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ErrorReport {
    errors: Vec<EvaluationError>,
}

impl ErrorReport {
    const fn new() -> Self {
        Self { errors: Vec::new() }
    }

    /// Builds the report for a batch from its per-rule outcomes, indexed by position.
    #[must_use]
    pub fn from_outcomes(outcomes: &[RuleOutcome]) -> Self {
        let mut report = Self::new();
        for (index, outcome) in outcomes.iter().enumerate() {
            if let Some(message) = outcome.message() {
                report.push(EvaluationError::new(index, message));
            }
        }
        report
    }

    fn push(&mut self, error: EvaluationError) {
        self.errors.push(error);
    }

    #[must_use]
    pub fn errors(&self) -> &[EvaluationError] {
        &self.errors
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn into_errors(self) -> Vec<EvaluationError> {
        self.errors
    }

    pub fn iter(&self) -> core::slice::Iter<'_, EvaluationError> {
        self.errors.iter()
    }
}

impl<'a> IntoIterator for &'a ErrorReport {
    type Item = &'a EvaluationError;
    type IntoIter = core::slice::Iter<'a, EvaluationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for ErrorReport {
    type Item = EvaluationError;
    type IntoIter = std::vec::IntoIter<EvaluationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} rule(s) failed", self.errors.len())?;
        for error in &self.errors {
            write!(f, "\n  {error}")?;
        }
        Ok(())
    }
}
