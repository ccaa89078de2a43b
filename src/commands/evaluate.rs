use super::Host;
use super::common::CommonArgs;
use crate::Result;
use crate::engine::Dialect;
use crate::eval::{ErrorReport, RuleEvaluator};
use crate::request::ContextSchema;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use ohno::{IntoAppError, bail};
use std::fs;
use std::io::{Read, Write};

#[derive(Parser, Debug)]
pub struct EvaluateArgs {
    /// Path to the evaluation request JSON, or `-` to read it from stdin
    #[arg(long, short = 'r', value_name = "PATH")]
    pub request: Utf8PathBuf,

    /// Print the outcome of every rule before the result
    #[arg(long)]
    pub explain: bool,

    /// Rule dialect [default: from configuration]
    #[arg(long, value_name = "DIALECT")]
    pub dialect: Option<Dialect>,

    /// Request layout [default: from configuration]
    #[arg(long, value_name = "LAYOUT")]
    pub schema: Option<ContextSchema>,

    #[command(flatten)]
    pub common: CommonArgs,
}

fn read_request<H: Host>(host: &mut H, path: &Utf8Path) -> Result<Vec<u8>> {
    if path.as_str() == "-" {
        let mut body = Vec::new();
        let _ = host
            .input()
            .read_to_end(&mut body)
            .into_app_err("reading evaluation request from stdin")?;
        return Ok(body);
    }

    fs::read(path).into_app_err_with(|| format!("reading evaluation request from {path}"))
}

/// Evaluates a request file and prints `OK` or the JSON list of failed rules.
///
/// Exits with code 1 when rules fail and code 2 when the request is invalid.
pub fn evaluate_request<H: Host>(host: &mut H, args: &EvaluateArgs) -> Result<()> {
    let config = args.common.setup(host)?;
    let body = read_request(host, &args.request)?;

    let schema = args.schema.unwrap_or(config.context_schema);
    let input = match schema.parse(&body) {
        Ok(input) => input,
        Err(e) => {
            let _ = writeln!(host.error(), "❌ {e}");
            host.exit(2);
            return Err(e).into_app_err_with(|| format!("evaluating {}", args.request));
        }
    };

    let evaluator = RuleEvaluator::new(args.dialect.unwrap_or(config.dialect));
    let outcomes = evaluator.classify(&input.rules, &input.context, input.time);

    if args.explain {
        let mut out = host.output();
        for (index, (rule, outcome)) in input.rules.iter().zip(&outcomes).enumerate() {
            let _ = writeln!(out, "[{index}] {rule}");
            let _ = writeln!(out, "    {outcome}");
        }
    }

    let report = ErrorReport::from_outcomes(&outcomes);
    if report.is_empty() {
        let _ = writeln!(host.output(), "OK");
        return Ok(());
    }

    let json = serde_json::to_string_pretty(&report).into_app_err("serializing evaluation errors")?;
    let _ = writeln!(host.output(), "{json}");
    host.exit(1);
    bail!("{} of {} rule(s) failed", report.len(), input.rules.len())
}
