use super::ErrorReport;

/// Why a batch of rules did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationFailure {
    /// The request was malformed and no rule was evaluated.
    #[error("invalid evaluation request: {reason}")]
    InvalidInput { reason: String },

    /// At least one rule did not pass.
    #[error("{0}")]
    RulesFailed(ErrorReport),
}

impl EvaluationFailure {
    #[must_use]
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput { reason: reason.into() }
    }
}
