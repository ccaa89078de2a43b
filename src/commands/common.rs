//! Logging setup and configuration loading shared by the subcommands.

use super::Host;
use super::config::Config;
use crate::Result;
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use std::io::Write;

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared by the subcommands that evaluate rules
#[derive(Args, Debug)]
pub struct CommonArgs {
    /// Path to configuration file [default: one of rules.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

impl CommonArgs {
    /// Initializes logging and loads the configuration, reporting any warnings.
    pub fn setup<H: Host>(&self, host: &mut H) -> Result<Config> {
        init_logging(self.log_level);

        let (config, warnings) = Config::load(&Utf8PathBuf::from("."), self.config.as_ref())?;
        print_warnings(host, &warnings);
        Ok(config)
    }
}

pub fn print_warnings<H: Host>(host: &mut H, warnings: &[String]) {
    if warnings.is_empty() {
        return;
    }

    let mut err = host.error();
    let _ = writeln!(err, "⚠️  Configuration warnings:");
    for warning in warnings {
        let _ = writeln!(err, "   {warning}");
    }
}

fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a second initialization (e.g. repeated runs in one process) keeps the first logger
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
