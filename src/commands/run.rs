//! Command dispatch logic for rule-evaluator

use super::{
    EvaluateArgs, FunctionsArgs, InitArgs, ServeArgs, ValidateArgs, evaluate_request, init_config, list_functions, serve_requests,
    validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "rule-evaluator", version, author, long_about = None)]
#[command(about = "Evaluate boolean business rules against a process context")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: RuleSubcommand,
}

#[derive(Subcommand, Debug)]
enum RuleSubcommand {
    /// Evaluate the rules of a request file
    Evaluate(Box<EvaluateArgs>),
    /// List the extension functions available to rules
    Functions(FunctionsArgs),
    /// Serve the HTTP evaluation endpoint
    Serve(Box<ServeArgs>),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let cli = Cli::parse_from(args);

    match &cli.command {
        RuleSubcommand::Evaluate(evaluate_args) => evaluate_request(host, evaluate_args),
        RuleSubcommand::Functions(functions_args) => list_functions(host, functions_args),
        RuleSubcommand::Serve(serve_args) => serve_requests(host, serve_args).await,
        RuleSubcommand::Init(init_args) => init_config(host, init_args),
        RuleSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
