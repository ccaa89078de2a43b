use super::{ErrorReport, EvaluationFailure, RuleOutcome};
use crate::engine::{CelEngine, Dialect, EngineSession, ExpressionEngine};
use crate::functions::FunctionRegistry;
use crate::value::EvaluationContext;
use chrono::{DateTime, FixedOffset};

const LOG_TARGET: &str = " evaluator";

/// Evaluates batches of rules against a context.
///
/// The evaluator holds no per-call state and can be shared between threads.
/// Every call opens its own engine session and collects its own errors.
#[derive(Debug)]
pub struct RuleEvaluator<E = CelEngine> {
    engine: E,
    functions: FunctionRegistry,
}

impl RuleEvaluator {
    /// Creates an evaluator backed by the CEL engine and the built-in functions.
    #[must_use]
    pub fn new(dialect: Dialect) -> Self {
        Self::with_engine(CelEngine::new(dialect), FunctionRegistry::builtin())
    }
}

impl Default for RuleEvaluator {
    fn default() -> Self {
        Self::new(Dialect::default())
    }
}

impl<E: ExpressionEngine> RuleEvaluator<E> {
    #[must_use]
    pub const fn with_engine(engine: E, functions: FunctionRegistry) -> Self {
        Self { engine, functions }
    }

    #[must_use]
    pub const fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    /// Evaluates every rule and returns one outcome per rule, in rule order.
    pub fn classify<R: AsRef<str>>(&self, rules: &[R], context: &EvaluationContext, time: DateTime<FixedOffset>) -> Vec<RuleOutcome> {
        let session = self.engine.session(&self.functions, context, time);

        rules
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                let outcome = RuleOutcome::classify(session.evaluate(rule.as_ref()));
                log::debug!(target: LOG_TARGET, "Rule {index} '{}': {outcome}", rule.as_ref());
                outcome
            })
            .collect()
    }

    /// Evaluates every rule and reports all rules that did not pass.
    ///
    /// Rules are never short-circuited: a failing rule does not prevent later rules from being evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`EvaluationFailure::RulesFailed`] carrying one error per rule that did not pass, ordered by rule index.
    pub fn evaluate<R: AsRef<str>>(
        &self,
        rules: &[R],
        context: &EvaluationContext,
        time: DateTime<FixedOffset>,
    ) -> Result<(), EvaluationFailure> {
        log::info!(target: LOG_TARGET, "Evaluating {} rule(s) at {time}", rules.len());

        let report = ErrorReport::from_outcomes(&self.classify(rules, context, time));

        if report.is_empty() {
            log::info!(target: LOG_TARGET, "All {} rule(s) passed", rules.len());
            Ok(())
        } else {
            log::info!(target: LOG_TARGET, "{} of {} rule(s) failed", report.len(), rules.len());
            Err(EvaluationFailure::RulesFailed(report))
        }
    }
}
