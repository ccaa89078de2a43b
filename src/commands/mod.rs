//! Command-line interface for rule-evaluator
//!
//! # Commands
//!
//! - **evaluate**: Evaluate the rules of a request file and print `OK` or the
//!   list of failed rules
//! - **functions**: List the extension functions available to rules
//! - **serve**: Run the HTTP evaluation endpoint
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. Output goes through a [`Host`] so the
//! commands can be exercised in tests.

mod common;
mod config;
mod evaluate;
mod functions;
mod host;
mod init;
mod run;
mod serve;
mod validate;

pub use common::LogLevel;
pub use config::{Config, DEFAULT_CONFIG_TOML, ServerConfig};
pub use evaluate::{EvaluateArgs, evaluate_request};
pub use functions::{FunctionsArgs, list_functions};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use serve::{ServeArgs, serve_requests};
pub use validate::{ValidateArgs, validate_config};
