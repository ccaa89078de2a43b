#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Evaluates batches of boolean business rules against a process context.
//!
//! A batch of rule expressions is evaluated against an [`EvaluationContext`](value::EvaluationContext)
//! at a caller-supplied point in time. Every rule is evaluated; the ones that do not
//! evaluate to `true` are reported with their index and a message.
//!
//! ```
//! use chrono::DateTime;
//! use rule_evaluator::engine::Dialect;
//! use rule_evaluator::eval::{EvaluationFailure, RuleEvaluator};
//! use rule_evaluator::value::EvaluationContext;
//! use serde_json::json;
//!
//! let evaluator = RuleEvaluator::new(Dialect::Feel);
//! let context = EvaluationContext::try_from(json!({"context": {"id": 1, "a": 2}})).unwrap();
//! let now = DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z").unwrap();
//!
//! let rules = [r#"has allowed changes(context, ["a"])"#, "context.id = 2"];
//! let Err(EvaluationFailure::RulesFailed(report)) = evaluator.evaluate(&rules, &context, now) else {
//!     panic!("the second rule should fail");
//! };
//! assert_eq!(report.errors()[0].index, 1);
//! ```
//!
//! # Module Organization
//!
//! - [`value`]: The value model for contexts, function arguments, and results
//! - [`functions`]: Extension functions callable from rules
//! - [`engine`]: Expression engines and the FEEL dialect front-end
//! - [`eval`]: Batch evaluation and error aggregation
//! - [`request`]: Transport request layouts
//! - [`server`]: HTTP endpoint
//! - [`commands`]: Command-line interface

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod commands;
pub mod engine;
pub mod eval;
pub mod functions;
pub mod request;
pub mod server;
pub mod value;

pub use crate::commands::{Host, run};
