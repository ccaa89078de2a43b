use super::conversion::{to_cel_value, to_rule_value};
use super::{Dialect, EngineFailure, EngineSession, ExpressionEngine, FeelTranslator};
use crate::functions::{FunctionDef, FunctionRegistry};
use crate::value::{EvaluationContext, RuleValue};
use cel_interpreter::extractors::Arguments;
use cel_interpreter::{Context, ExecutionError, Program, Value};
use chrono::{DateTime, FixedOffset};
use core::cell::Cell;
use core::fmt;
use core::panic::AssertUnwindSafe;
use std::panic;
use std::sync::Once;

const LOG_TARGET: &str = "    engine";

/// Name of the variable holding the evaluation clock.
pub const CLOCK_VARIABLE: &str = "now";

/// Evaluates rules with the CEL interpreter.
///
/// Rules in the FEEL dialect are rewritten into CEL before compilation.
#[derive(Debug, Clone, Copy, Default)]
pub struct CelEngine {
    dialect: Dialect,
}

impl CelEngine {
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }
}

impl ExpressionEngine for CelEngine {
    type Session = CelSession;

    fn session(&self, functions: &FunctionRegistry, context: &EvaluationContext, clock: DateTime<FixedOffset>) -> CelSession {
        let mut cel_context = Context::default();

        for (name, value) in context {
            cel_context.add_variable_from_value(name.as_str(), to_cel_value(value));
        }

        // added last so it wins over a context entry with the same name
        cel_context.add_variable_from_value(CLOCK_VARIABLE, Value::Timestamp(clock));

        for def in functions.iter() {
            let identifier = def.identifier();
            cel_context.add_function(&identifier, move |Arguments(args): Arguments| invoke(def, &args));
        }

        let translator = match self.dialect {
            Dialect::Feel => Some(FeelTranslator::new(functions)),
            Dialect::Cel => None,
        };

        CelSession {
            context: cel_context,
            translator,
        }
    }
}

fn invoke(def: &'static FunctionDef, args: &[Value]) -> Result<Value, ExecutionError> {
    let args = args
        .iter()
        .map(to_rule_value)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ExecutionError::function_error(def.name, &e.to_string()))?;

    def.call(&args)
        .map(|result| to_cel_value(&result))
        .map_err(|e| ExecutionError::function_error(def.name, &e.to_string()))
}

/// A CEL context bound to one evaluation call.
pub struct CelSession {
    context: Context<'static>,
    translator: Option<FeelTranslator>,
}

impl fmt::Debug for CelSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CelSession")
            .field("translator", &self.translator)
            .finish_non_exhaustive()
    }
}

impl EngineSession for CelSession {
    fn evaluate(&self, expression: &str) -> Result<RuleValue, EngineFailure> {
        let translated;
        let source = if let Some(translator) = &self.translator {
            translated = translator.translate(expression)?;
            log::trace!(target: LOG_TARGET, "Translated '{expression}' to '{translated}'");
            translated.as_str()
        } else {
            expression
        };

        let value = contain_panics(expression, || {
            let program = Program::compile(source).map_err(|e| EngineFailure::new(e.to_string()))?;
            program.execute(&self.context).map_err(|e| EngineFailure::new(e.to_string()))
        })??;

        to_rule_value(&value).map_err(|e| EngineFailure::new(e.to_string()))
    }
}

thread_local! {
    static SILENCE_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Runs `f`, turning a panic inside the CEL parser or interpreter into a failure of this one expression.
///
/// The parser panics on some malformed input instead of returning an error. Panics raised on this
/// thread while `f` runs are not reported by the panic hook.
fn contain_panics<T>(expression: &str, f: impl FnOnce() -> T) -> Result<T, EngineFailure> {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !SILENCE_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });

    SILENCE_PANICS.with(|silence| silence.set(true));
    let result = panic::catch_unwind(AssertUnwindSafe(f));
    SILENCE_PANICS.with(|silence| silence.set(false));

    result.map_err(|payload| {
        let detail = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown cause");
        log::debug!(target: LOG_TARGET, "CEL panicked on '{expression}': {detail}");
        EngineFailure::new(format!("syntax error in '{expression}'"))
    })
}
