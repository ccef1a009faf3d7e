//! `appkod init` - write a starter Blueprint.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use appkod_adapters::{DocumentFormat, StarterBlueprint};

use crate::{
    cli::InitArgs,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const FALLBACK_NAME: &str = "my-app";

#[instrument(skip_all, fields(template = ?args.template, format = ?args.format))]
pub fn execute(args: InitArgs, output: OutputManager) -> CliResult<()> {
    let starter = StarterBlueprint::from(args.template);
    let format = DocumentFormat::from(args.format);
    let target = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("blueprint.{}", format.extension())));

    if target.exists() {
        if !args.force {
            return Err(CliError::FileExists { path: target });
        }
        output.warning(&format!("Overwriting {}", target.display()))?;
    }

    let name = match args.name {
        Some(name) if name.trim().is_empty() => {
            return Err(CliError::InvalidInput {
                message: "Blueprint name must not be empty".into(),
                source: None,
            });
        }
        Some(name) => name,
        None => default_name(),
    };

    let text = starter
        .render(&name, format)
        .with_cli_context(|| format!("rendering the {starter} starter"))?;
    write_file(&target, &text)?;
    info!(path = %target.display(), starter = %starter, "Starter blueprint written");

    output.success(&format!(
        "Created {} from the '{starter}' starter",
        target.display()
    ))?;
    output.info(&format!(
        "Check it with: appkod validate {}",
        target.display()
    ))?;
    Ok(())
}

fn write_file(path: &Path, text: &str) -> CliResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_cli_context(|| format!("creating {}", parent.display()))?;
    }
    std::fs::write(path, text).with_cli_context(|| format!("writing {}", path.display()))
}

/// The current directory's name, or a placeholder when it has none.
fn default_name() -> String {
    std::env::current_dir()
        .ok()
        .and_then(|dir| dir.file_name().map(|n| n.to_string_lossy().into_owned()))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_NAME.to_string())
}
