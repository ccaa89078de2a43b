//! Rule batch evaluation and error aggregation.

mod evaluation_error;
mod evaluator;
mod failure;
mod outcome;
mod report;

pub use evaluation_error::EvaluationError;
pub use evaluator::RuleEvaluator;
pub use failure::EvaluationFailure;
pub use outcome::{FALSE_RESULT_MESSAGE, RuleOutcome};
pub use report::ErrorReport;
