use super::Host;
use super::common::print_warnings;
use super::config::Config;
use crate::Result;
use camino::Utf8PathBuf;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct ValidateArgs {
    /// Path to configuration file [default: one of rules.[toml|yml|yaml|json] ]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,
}

pub fn validate_config<H: Host>(host: &mut H, args: &ValidateArgs) -> Result<()> {
    let root = Utf8PathBuf::from(".");
    let config_path = args.config.as_ref();

    match Config::load(&root, config_path) {
        Ok((config, warnings)) => {
            {
                let mut out = host.output();
                let _ = writeln!(out, "Configuration validation successful");
                if let Some(path) = config_path {
                    let _ = writeln!(out, "Config file: {path}");
                } else {
                    let _ = writeln!(out, "Using rules.[toml|yml|yaml|json] or the defaults");
                }
                let _ = writeln!(out, "Dialect: {}, request layout: {}", config.dialect, config.context_schema);
            }

            print_warnings(host, &warnings);
            Ok(())
        }
        Err(e) => {
            let _ = writeln!(host.error(), "❌ Configuration validation failed: {e}");
            host.exit(1);
            Err(e)
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::commands::host::TestHost;
    use crate::commands::init::{InitArgs, init_config};

    fn temp_path(tmp: &tempfile::TempDir, name: &str) -> Utf8PathBuf {
        Utf8PathBuf::try_from(tmp.path().join(name)).unwrap()
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_default_config_is_valid() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "rules.toml");

        let mut init_host = TestHost::new();
        init_config(&mut init_host, &InitArgs { output: config_path.clone() }).unwrap();
        assert!(init_host.output_str().contains("Generated default configuration file"));

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();

        let output = host.output_str();
        assert!(output.contains("Configuration validation successful"), "{output}");
        assert!(output.contains("Dialect: feel, request layout: event"), "{output}");
        assert!(host.error_str().is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_toml_syntax() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "invalid.toml");
        std::fs::write(&config_path, "[server\nlisten = 1\n").unwrap();

        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(config_path) });

        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
        assert!(host.error_str().starts_with("❌ Configuration validation failed"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_dialect() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "rules.json");
        std::fs::write(&config_path, r#"{"dialect": "sql"}"#).unwrap();

        let mut host = TestHost::new();
        let result = validate_config(&mut host, &ValidateArgs { config: Some(config_path) });
        assert!(result.is_err());
        assert_eq!(host.exit_code, Some(1));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_warnings_are_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let config_path = temp_path(&tmp, "rules.yml");
        std::fs::write(&config_path, "server:\n  listen: \"0.0.0.0:8080\"\n").unwrap();

        let mut host = TestHost::new();
        validate_config(&mut host, &ValidateArgs { config: Some(config_path) }).unwrap();
        assert!(host.error_str().contains("every network interface"), "{}", host.error_str());
        assert_eq!(host.exit_code, None);
    }
}
