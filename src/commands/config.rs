use crate::Result;
use crate::engine::Dialect;
use crate::request::ContextSchema;
use camino::{Utf8Path, Utf8PathBuf};
use core::net::SocketAddr;
use ohno::{IntoAppError, app_err, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Request bodies above this size draw a warning.
const LARGE_BODY_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Surface syntax of the rules
    #[serde(default)]
    pub dialect: Dialect,

    /// Request layout accepted by `evaluate` and the HTTP endpoint
    #[serde(default)]
    pub context_schema: ContextSchema,

    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address the HTTP endpoint listens on
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,

    /// Largest accepted request body, in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([127, 0, 0, 1], 8080))
}

const fn default_max_body_bytes() -> usize {
    1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, the first of `rules.toml`, `rules.yml`, `rules.yaml`, and `rules.json`
    /// found in `root` is used. Returns the configuration together with any validation warnings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid settings
    pub fn load(root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<(Self, Vec<String>)> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading rule-evaluator configuration from {path}"))?;
            (path.clone(), text)
        } else {
            let candidates = [
                root.join("rules.toml"),
                root.join("rules.yml"),
                root.join("rules.yaml"),
                root.join("rules.json"),
            ];

            let mut found = None;
            for path in &candidates {
                match fs::read_to_string(path) {
                    Ok(text) => {
                        found = Some((path.clone(), text));
                        break;
                    }
                    Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                    Err(e) => return Err(e).into_app_err_with(|| format!("reading rule-evaluator configuration from {path}")),
                }
            }

            let Some(result) = found else {
                return Ok((Self::default(), Vec::new()));
            };
            result
        };

        let extension = final_path.extension().unwrap_or_default();
        let config: Self = match extension {
            "toml" => toml::from_str(&text).into_app_err_with(|| format!("parsing TOML configuration from {final_path}"))?,
            "yml" | "yaml" => serde_yaml::from_str(&text).into_app_err_with(|| format!("parsing YAML configuration from {final_path}"))?,
            "json" => serde_json::from_str(&text).into_app_err_with(|| format!("parsing JSON configuration from {final_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        let mut warnings = Vec::new();
        config.validate(&mut warnings)?;
        Ok((config, warnings))
    }

    /// Save configuration to a file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or serialization fails
    pub fn save(&self, output_path: &Utf8Path) -> Result<()> {
        let extension = output_path.extension().unwrap_or_default();
        let text = match extension {
            "toml" => toml::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to TOML for saving to {output_path}"))?,
            "yml" | "yaml" => serde_yaml::to_string(self)
                .into_app_err_with(|| format!("serializing configuration to YAML for saving to {output_path}"))?,
            "json" => serde_json::to_string_pretty(self)
                .into_app_err_with(|| format!("serializing configuration to JSON for saving to {output_path}"))?,
            _ => return Err(app_err!("unsupported configuration file extension: {extension}")),
        };

        fs::write(output_path, text).into_app_err_with(|| format!("writing configuration to {output_path}"))?;
        Ok(())
    }

    /// Save the default configuration, keeping the comments of the embedded file when writing TOML
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        if output_path.extension() == Some("toml") {
            fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
            Ok(())
        } else {
            Self::default().save(output_path)
        }
    }

    /// Check settings, failing on invalid ones and collecting warnings for suspicious ones
    fn validate(&self, warnings: &mut Vec<String>) -> Result<()> {
        if self.server.max_body_bytes == 0 {
            bail!("server.max_body_bytes must be greater than 0");
        }

        if self.server.max_body_bytes > LARGE_BODY_BYTES {
            warnings.push(format!(
                "server.max_body_bytes is {} bytes; requests this large are unusual for rule evaluation",
                self.server.max_body_bytes
            ));
        }

        if self.server.listen.ip().is_unspecified() {
            warnings.push(format!(
                "server.listen ({}) accepts connections on every network interface",
                self.server.listen
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_root() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();
        (tmp, root)
    }

    #[test]
    fn test_default_config_matches_embedded() {
        let config = Config::default();
        assert_eq!(config.dialect, Dialect::Feel);
        assert_eq!(config.context_schema, ContextSchema::Event);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_default_config_is_valid() {
        let mut warnings = Vec::new();
        Config::default().validate(&mut warnings).unwrap();
        assert!(warnings.is_empty(), "{warnings:?}");
    }

    #[test]
    fn test_zero_body_limit_is_rejected() {
        let mut config = Config::default();
        config.server.max_body_bytes = 0;
        let err = config.validate(&mut Vec::new()).unwrap_err();
        assert!(err.to_string().contains("server.max_body_bytes must be greater than 0"));
    }

    #[test]
    fn test_suspicious_settings_warn() {
        let mut config = Config::default();
        config.server.listen = "0.0.0.0:9000".parse().unwrap();
        config.server.max_body_bytes = LARGE_BODY_BYTES + 1;

        let mut warnings = Vec::new();
        config.validate(&mut warnings).unwrap();
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_missing_config_uses_defaults() {
        let (_tmp, root) = temp_root();
        let (config, warnings) = Config::load(&root, None).unwrap();
        assert_eq!(config, Config::default());
        assert!(warnings.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_load_finds_candidate_files() {
        let (_tmp, root) = temp_root();
        fs::write(root.join("rules.yaml"), "dialect: cel\ncontext_schema: process-state\n").unwrap();

        let (config, _) = Config::load(&root, None).unwrap();
        assert_eq!(config.dialect, Dialect::Cel);
        assert_eq!(config.context_schema, ContextSchema::ProcessState);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_and_load_each_format() {
        let (_tmp, root) = temp_root();
        let config = Config {
            dialect: Dialect::Cel,
            context_schema: ContextSchema::ProcessState,
            server: ServerConfig {
                listen: "127.0.0.1:9191".parse().unwrap(),
                max_body_bytes: 4096,
            },
        };

        for name in ["a.toml", "a.yml", "a.json"] {
            let path = root.join(name);
            config.save(&path).unwrap();
            let (loaded, _) = Config::load(&root, Some(&path)).unwrap();
            assert_eq!(loaded, config, "{name}");
        }
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_save_default_keeps_comments() {
        let (_tmp, root) = temp_root();
        let path = root.join("rules.toml");
        Config::save_default(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG_TOML);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unknown_field() {
        let (_tmp, root) = temp_root();
        let path = root.join("rules.toml");
        fs::write(&path, "dialect = \"feel\"\nstrict = true\n").unwrap();

        let err = Config::load(&root, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("unknown field `strict`"), "{err}");
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_unsupported_extension() {
        let (_tmp, root) = temp_root();
        let path = root.join("rules.ini");
        fs::write(&path, "").unwrap();

        let err = Config::load(&root, Some(&path)).unwrap_err();
        assert!(err.to_string().contains("unsupported configuration file extension: ini"));
    }
}
