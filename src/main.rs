//! Evaluate boolean business rules against a process context.
//!
//! # Quick Start
//!
//! Evaluate a request file:
//!
//! ```bash
//! rule-evaluator evaluate --request request.json
//! ```
//!
//! Read the request from stdin and show the outcome of every rule:
//!
//! ```bash
//! cat request.json | rule-evaluator evaluate --request - --explain
//! ```
//!
//! Serve `POST /rules/evaluate` and `GET /rules/functions`:
//!
//! ```bash
//! rule-evaluator serve --listen 127.0.0.1:8080
//! ```
//!
//! Generate and check a configuration file:
//!
//! ```bash
//! rule-evaluator init rules.toml
//! rule-evaluator validate --config rules.toml
//! ```
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use rule_evaluator::{Host, run};
use std::io::{Read, Write};
use std::io::{stderr, stdin, stdout};

/// Default host backed by the process's standard streams.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for RealHost {
    fn input(&mut self) -> impl Read {
        stdin()
    }

    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
