use crate::value::{RuleValue, ValueKind};
use serde::Serialize;

/// A verification function callable from rule expressions.
///
/// Functions are pure: they inspect their arguments and report a boolean.
#[derive(Debug, Serialize)]
pub struct FunctionDef {
    /// The name rules use to invoke the function, e.g. `has allowed changes`.
    pub name: &'static str,
    pub description: &'static str,
    /// Parameter names, in call order. The arity is the number of entries.
    pub parameters: &'static [&'static str],
    #[serde(skip)]
    pub body: fn(&[RuleValue]) -> Result<bool, FunctionError>,
}

macro_rules! function_def {
    ($name:expr, $description:expr, [$($param:expr),* $(,)?], $body:expr) => {
        FunctionDef {
            name: $name,
            description: $description,
            parameters: &[$($param),*],
            body: $body,
        }
    };
}

pub(super) use function_def;

impl FunctionDef {
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.parameters.len()
    }

    /// The name as a single identifier, with spaces replaced by underscores.
    ///
    /// Engines that do not allow spaces in function names register the function under this name.
    #[must_use]
    pub fn identifier(&self) -> String {
        self.name.replace(' ', "_")
    }

    /// Invokes the function after checking the argument count.
    ///
    /// # Errors
    ///
    /// Returns an error if the argument count does not match the arity or the arguments have the wrong shape.
    pub fn call(&self, args: &[RuleValue]) -> Result<RuleValue, FunctionError> {
        if args.len() != self.arity() {
            return Err(FunctionError::Arity {
                expected: self.arity(),
                actual: args.len(),
            });
        }

        (self.body)(args).map(RuleValue::Boolean)
    }
}

/// Why an extension function could not produce a result.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FunctionError {
    #[error("expected {expected} argument(s), got {actual}")]
    Arity { expected: usize, actual: usize },

    #[error("'{name}' must be a {expected}, got {actual}")]
    WrongType {
        name: String,
        expected: ValueKind,
        actual: ValueKind,
    },

    #[error("'{name}' is missing")]
    Missing { name: String },
}

impl FunctionError {
    pub(super) fn wrong_type(name: impl Into<String>, expected: ValueKind, actual: &RuleValue) -> Self {
        Self::WrongType {
            name: name.into(),
            expected,
            actual: actual.kind(),
        }
    }

    pub(super) fn missing(name: impl Into<String>) -> Self {
        Self::Missing { name: name.into() }
    }
}
