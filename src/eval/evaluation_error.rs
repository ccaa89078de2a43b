use core::fmt;
use serde::{Deserialize, Serialize};

/// A rule that did not pass, identified by its position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationError {
    pub index: usize,
    pub message: String,
}

impl EvaluationError {
    #[must_use]
    pub fn new(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            message: message.into(),
        }
    }
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}: {}", self.index, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let error = EvaluationError::new(2, "Rule evaluated to 'false'");
        insta::assert_snapshot!(
            serde_json::to_string(&error).unwrap(),
            @r#"{"index":2,"message":"Rule evaluated to 'false'"}"#
        );
    }
}
