//! `appkod validate` - check a Blueprint or contract document.

use std::path::Path;

use serde_json::json;
use tracing::{debug, instrument};

use appkod_adapters::FileDocumentLoader;
use appkod_core::{
    application::{BlueprintSummary, ValidationService},
    domain::{Entity, ValidationReport},
    error::AppkodError,
};

use crate::{
    cli::{GlobalArgs, ValidateArgs},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all, fields(contract = ?args.contract))]
pub fn execute(
    args: ValidateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let path = args
        .file
        .clone()
        .unwrap_or_else(|| config.validation.default_file.clone());
    let options = config.validator_options(args.max_depth);
    debug!(path = %path.display(), max_depth = options.max_depth, "Validating");

    let service =
        ValidationService::new(Box::new(FileDocumentLoader::new())).with_options(options);
    let show_details = args.summary || global.verbose > 0;

    match args.contract {
        Some(entity) => validate_contract(&service, entity, &path, show_details, &output),
        None => validate_blueprint(&service, &path, show_details, &output),
    }
}

fn validate_blueprint(
    service: &ValidationService,
    path: &Path,
    show_summary: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let blueprint = match service.validate_blueprint_file(path) {
        Ok(blueprint) => blueprint,
        Err(AppkodError::Validation(report)) => {
            return report_failure("Blueprint", path, &report, output);
        }
        Err(e) => return Err(e.into()),
    };
    let summary = BlueprintSummary::from(&blueprint);

    if output.is_json() {
        output.json(&json!({
            "valid": true,
            "file": path.display().to_string(),
            "summary": summary,
        }))?;
        return Ok(());
    }

    output.success(&format!("Blueprint is valid: {}", path.display()))?;
    if show_summary {
        print_summary(&summary, output)?;
    }
    Ok(())
}

fn validate_contract(
    service: &ValidationService,
    entity: Entity,
    path: &Path,
    show_document: bool,
    output: &OutputManager,
) -> CliResult<()> {
    let document = match service.validate_contract_file(entity, path) {
        Ok(document) => document,
        Err(AppkodError::Validation(report)) => {
            return report_failure(&format!("Contract '{entity}'"), path, &report, output);
        }
        Err(e) => return Err(e.into()),
    };

    if output.is_json() {
        output.json(&json!({
            "valid": true,
            "file": path.display().to_string(),
            "entity": entity.as_str(),
            "document": document,
        }))?;
        return Ok(());
    }

    output.success(&format!("Valid {entity}: {}", path.display()))?;
    if show_document {
        let rendered = serde_yaml::to_string(&document).map_err(|e| CliError::InvalidInput {
            message: format!("Could not render the defaulted document: {e}"),
            source: Some(Box::new(e)),
        })?;
        output.header("With defaults applied:")?;
        output.print(rendered.trim_end())?;
    }
    Ok(())
}

fn report_failure(
    subject: &str,
    path: &Path,
    report: &ValidationReport,
    output: &OutputManager,
) -> CliResult<()> {
    if output.is_json() {
        let issues: Vec<_> = report
            .iter()
            .map(|issue| {
                json!({
                    "path": issue.path.to_string(),
                    "message": issue.message,
                    "kind": issue.kind,
                })
            })
            .collect();
        output.json(&json!({
            "valid": false,
            "file": path.display().to_string(),
            "issues": issues,
        }))?;
    } else {
        output.error(&format!("{subject} is invalid: {}", path.display()))?;
        output.issues(report)?;
    }

    Err(CliError::ValidationFailed {
        subject: subject.to_string(),
        count: report.len(),
    })
}

fn print_summary(summary: &BlueprintSummary, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("{} (v{})", summary.name, summary.version))?;
    if let Some(description) = &summary.description {
        output.print(&format!("  {description}"))?;
    }
    output.field("Tables", summary.tables)?;
    output.field("Pages", summary.pages)?;
    output.field("Endpoints", summary.endpoints)?;
    output.field("Workflows", summary.workflows)?;
    output.field("Connectors", summary.connectors)?;
    Ok(())
}
