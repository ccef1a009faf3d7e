//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The CLI
//! owns config; the core crate only ever sees the [`ValidatorOptions`] built
//! from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `APPKOD_<SECTION>__<KEY>`, e.g. `APPKOD_VALIDATION__MAX_DEPTH=32`
//! 3. Config file: `--config <FILE>`, or [`AppConfig::config_path`] if it exists
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use appkod_adapters::PARSABLE_COMPONENT_NESTING;
use appkod_core::domain::{DEFAULT_MAX_DEPTH, ValidatorOptions};

const ENV_PREFIX: &str = "APPKOD";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub validation: ValidationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Maximum component nesting depth. Values above
    /// [`PARSABLE_COMPONENT_NESTING`] only matter for documents that parse,
    /// and files nested that deep fail to parse first.
    pub max_depth: usize,
    /// File `appkod validate` reads when no path is given.
    pub default_file: PathBuf,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            default_file: PathBuf::from("blueprint.yaml"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    /// `auto`, `human`, `plain` or `json`. `--output-format` wins when given.
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment on top of the defaults.
    ///
    /// `config_file` is the path passed via `--config`. It must exist; the
    /// default location is optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::from(Self::config_path()).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .context("Failed to read configuration sources")?;

        let config: Self = settings
            .try_deserialize()
            .context("Configuration has invalid values")?;

        tracing::debug!(?config, "Configuration loaded");
        Ok(config)
    }

    /// Path to the default configuration file.
    ///
    /// Falls back to `.appkod.toml` in the current directory when no home
    /// directory can be determined.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("se", "appkod", "appkod")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".appkod.toml"))
    }

    /// Validator options, with `max_depth` overridden by a CLI flag if given.
    pub fn validator_options(&self, max_depth: Option<usize>) -> ValidatorOptions {
        let max_depth = max_depth.unwrap_or(self.validation.max_depth);
        if max_depth > PARSABLE_COMPONENT_NESTING {
            tracing::debug!(
                max_depth,
                parsable = PARSABLE_COMPONENT_NESTING,
                "Depth bound exceeds what the document parsers accept"
            );
        }
        ValidatorOptions::default().with_max_depth(max_depth)
    }

    /// Serialize as TOML, the format `config init` writes.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }

    /// Write this configuration to `path`, creating parent directories.
    pub fn write_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(path, self.to_toml()?)
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_engine_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.validation.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(cfg.validation.default_file, PathBuf::from("blueprint.yaml"));
        assert_eq!(cfg.output.format, "auto");
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("appkod.toml");
        std::fs::write(&path, "[validation]\nmax_depth = 8\n").unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(cfg.validation.max_depth, 8);
        assert_eq!(cfg.validation.default_file, PathBuf::from("blueprint.yaml"));
        assert_eq!(cfg.output.format, "auto");
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn written_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = AppConfig::default();
        cfg.validation.max_depth = 12;
        cfg.write_to(&path).unwrap();

        assert_eq!(AppConfig::load(Some(&path)).unwrap().validation.max_depth, 12);
    }

    #[test]
    fn flag_overrides_configured_depth() {
        let mut cfg = AppConfig::default();
        cfg.validation.max_depth = 10;

        assert_eq!(cfg.validator_options(None).max_depth, 10);
        assert_eq!(cfg.validator_options(Some(3)).max_depth, 3);
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
