//! Extension functions callable from rule expressions.

mod builtins;
mod function_def;
mod registry;

pub use builtins::{
    BUILTIN_FUNCTIONS, PLACEHOLDER_PROOF_POINT, PLACEHOLDER_PROOF_TYPE, PLACEHOLDER_PROOF_VALUE, PLACEHOLDER_VP_PROOF_VALUE,
    REPORT_FIELDS,
};
pub use function_def::{FunctionDef, FunctionError};
pub use registry::FunctionRegistry;
