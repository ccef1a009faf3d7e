//! `appkod config` - inspect or create the configuration file.

use std::path::PathBuf;

use crate::{
    cli::ConfigCommands,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Dispatch to the correct config subcommand.
///
/// `config_file` is the `--config` path, if one was given.
pub fn execute(
    cmd: ConfigCommands,
    config: AppConfig,
    config_file: Option<PathBuf>,
    output: OutputManager,
) -> CliResult<()> {
    let path = config_file.unwrap_or_else(AppConfig::config_path);

    match cmd {
        ConfigCommands::Get { key } => {
            let value = get_config_value(&config, &key)?;
            output.print(&value)?;
        }

        ConfigCommands::List => {
            let serialised = config.to_toml().map_err(|e| CliError::ConfigError {
                message: format!("Failed to serialise config: {e}"),
                source: Some(e.into()),
            })?;
            output.print(serialised.trim_end())?;
        }

        ConfigCommands::Path => {
            output.print(&path.display().to_string())?;
        }

        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(CliError::FileExists { path });
            }
            AppConfig::default()
                .write_to(&path)
                .map_err(|e| CliError::ConfigError {
                    message: format!("Failed to write {}", path.display()),
                    source: Some(e.into()),
                })?;
            output.success(&format!("Wrote default configuration to {}", path.display()))?;
        }
    }

    Ok(())
}

// ── helpers ───────────────────────────────────────────────────────────────────

fn get_config_value(config: &AppConfig, key: &str) -> CliResult<String> {
    match key {
        "validation.max_depth" => Ok(config.validation.max_depth.to_string()),
        "validation.default_file" => Ok(config.validation.default_file.display().to_string()),
        "output.no_color" => Ok(config.output.no_color.to_string()),
        "output.format" => Ok(config.output.format.clone()),
        _ => Err(CliError::ConfigError {
            message: format!("Unknown config key: '{key}'"),
            source: None,
        }),
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_known_keys() {
        let cfg = AppConfig::default();
        assert_eq!(get_config_value(&cfg, "validation.max_depth").unwrap(), "64");
        assert_eq!(
            get_config_value(&cfg, "validation.default_file").unwrap(),
            "blueprint.yaml"
        );
        assert_eq!(get_config_value(&cfg, "output.no_color").unwrap(), "false");
    }

    #[test]
    fn get_unknown_key_is_error() {
        let cfg = AppConfig::default();
        assert!(matches!(
            get_config_value(&cfg, "does.not.exist"),
            Err(CliError::ConfigError { .. })
        ));
    }
}
