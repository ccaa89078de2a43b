//! Expression engines that evaluate a single rule.
//!
//! The evaluator talks to an engine through [`ExpressionEngine`]. Each
//! evaluation call opens one [`EngineSession`] that binds the context, the
//! clock, and the extension functions, and then evaluates every rule of the
//! batch against that session.

mod cel_engine;
mod conversion;
mod dialect;
mod feel;

pub use cel_engine::{CelEngine, CelSession};
pub use dialect::Dialect;
pub use feel::FeelTranslator;

use crate::functions::FunctionRegistry;
use crate::value::{EvaluationContext, RuleValue};
use chrono::{DateTime, FixedOffset};

/// Evaluates rule expressions.
pub trait ExpressionEngine: Send + Sync {
    type Session: EngineSession;

    /// Binds the functions, the context, and the clock for one evaluation call.
    ///
    /// Every expression evaluated through the returned session observes the same clock value.
    fn session(&self, functions: &FunctionRegistry, context: &EvaluationContext, clock: DateTime<FixedOffset>) -> Self::Session;
}

/// An engine bound to a single context and clock.
pub trait EngineSession {
    /// Evaluates one expression.
    ///
    /// # Errors
    ///
    /// Returns a failure if the expression cannot be parsed or fails at runtime.
    fn evaluate(&self, expression: &str) -> Result<RuleValue, EngineFailure>;
}

/// A syntax or runtime failure reported by an engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EngineFailure {
    message: String,
}

impl EngineFailure {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
