//! `appkod schema` - list registry entities or describe one.

use appkod_core::application::{EntityDescription, EntityInfo, SchemaService};

use crate::{
    cli::SchemaArgs,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: SchemaArgs, output: OutputManager) -> CliResult<()> {
    let service = SchemaService::new();

    match args.entity {
        Some(name) => {
            let description = service
                .describe(&name)
                .with_cli_context(|| format!("describing '{name}'"))?;
            if output.is_json() {
                output.json(&description)?;
            } else {
                print_description(&description, &output)?;
            }
        }
        None => {
            let entities = service.list(args.family.map(Into::into));
            if output.is_json() {
                output.json(&entities)?;
            } else {
                print_listing(&entities, &output)?;
            }
        }
    }

    Ok(())
}

fn print_listing(entities: &[EntityInfo], output: &OutputManager) -> CliResult<()> {
    let mut family = "";
    for entity in entities {
        if entity.family != family {
            family = entity.family.as_str();
            output.header(&format!("{family}:"))?;
        }
        if entity.fields == 0 {
            output.print(&format!("  {}", entity.name))?;
        } else {
            output.print(&format!("  {:<28}{} fields", entity.name, entity.fields))?;
        }
    }
    Ok(())
}

fn print_description(description: &EntityDescription, output: &OutputManager) -> CliResult<()> {
    output.header(&format!("{} ({})", description.name, description.family))?;

    if description.fields.is_empty() {
        output.print("  (not an object: validated by value rules only)")?;
    }
    for field in &description.fields {
        let marker = if field.required { "*" } else { " " };
        let default = field
            .default
            .as_deref()
            .map(|d| format!(" = {d}"))
            .unwrap_or_default();
        output.print(&format!(
            "  {marker} {:<20}{}{default}",
            field.name, field.type_name
        ))?;
    }

    if !description.rules.is_empty() {
        output.print("")?;
        output.header("Rules:")?;
        for rule in &description.rules {
            output.print(&format!("  - {rule}"))?;
        }
    }
    Ok(())
}
