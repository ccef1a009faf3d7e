//! CLI argument definitions using the clap derive API.
//!
//! Argument names, help text, and value enums live here. No validation logic.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use appkod_adapters::{DocumentFormat, StarterBlueprint};
use appkod_core::domain::{Entity, EntityFamily};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "appkod",
    bin_name = "appkod",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Validate Appkod Blueprints and platform contracts",
    long_about = "Appkod checks declarative app Blueprints (database, UI, API, \
                  workflows, auth) for structural and referential errors before \
                  any code is generated.",
    after_help = "EXAMPLES:\n\
        \x20 appkod validate blueprint.yaml\n\
        \x20 appkod validate tenant.json --contract create-tenant-request\n\
        \x20 appkod init my-crm --template crm\n\
        \x20 appkod schema table",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Validate a Blueprint (or a platform contract) file.
    #[command(
        visible_alias = "v",
        about = "Validate a Blueprint or contract document",
        after_help = "EXAMPLES:\n\
            \x20 appkod validate                      # ./blueprint.yaml\n\
            \x20 appkod validate app.json --summary\n\
            \x20 appkod validate user.yaml --contract create-user-request\n\
            \x20 appkod validate app.yaml --output-format json"
    )]
    Validate(ValidateArgs),

    /// Write a starter Blueprint.
    #[command(
        about = "Create a starter Blueprint",
        after_help = "EXAMPLES:\n\
            \x20 appkod init\n\
            \x20 appkod init \"Sales CRM\" --template crm\n\
            \x20 appkod init my-app --format json --output app.json"
    )]
    Init(InitArgs),

    /// Inspect the schema registry.
    #[command(
        about = "List schema entities or describe one",
        after_help = "EXAMPLES:\n\
            \x20 appkod schema\n\
            \x20 appkod schema --family tenant\n\
            \x20 appkod schema endpoint"
    )]
    Schema(SchemaArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 appkod completions bash > ~/.local/share/bash-completion/completions/appkod\n\
            \x20 appkod completions zsh  > ~/.zfunc/_appkod"
    )]
    Completions(CompletionsArgs),

    /// Inspect or create the configuration file.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 appkod config get validation.max_depth\n\
            \x20 appkod config list\n\
            \x20 appkod config init"
    )]
    Config(ConfigCommands),
}

// ── validate ──────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Document to validate. Defaults to `validation.default_file`.
    #[arg(value_name = "FILE", help = "YAML or JSON document to validate")]
    pub file: Option<PathBuf>,

    /// Validate against a platform contract instead of the Blueprint schema.
    #[arg(
        long = "contract",
        value_name = "ENTITY",
        value_parser = parse_entity,
        help = "Validate as a platform contract, e.g. create-tenant-request"
    )]
    pub contract: Option<Entity>,

    #[arg(long = "summary", help = "Print a summary of the valid Blueprint")]
    pub summary: bool,

    #[arg(
        long = "max-depth",
        value_name = "N",
        help = "Maximum component nesting depth (overrides config)",
        long_help = "Maximum component nesting depth (overrides config).\n\
            Files nested past about 60 component levels are rejected by the \
            YAML/JSON parser before this limit applies."
    )]
    pub max_depth: Option<usize>,
}

fn parse_entity(name: &str) -> Result<Entity, String> {
    Entity::from_name(name).map_err(|_| {
        format!("unknown schema entity '{name}' (run `appkod schema` for the list)")
    })
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project name written into the Blueprint.
    #[arg(value_name = "NAME", help = "Blueprint name (default: current directory name)")]
    pub name: Option<String>,

    #[arg(
        short = 't',
        long = "template",
        value_enum,
        default_value = "blank",
        help = "Starter to copy"
    )]
    pub template: StarterArg,

    #[arg(
        short = 'f',
        long = "format",
        value_enum,
        default_value = "yaml",
        help = "File format"
    )]
    pub format: FormatArg,

    /// Where to write. Defaults to `blueprint.<format>` in the current directory.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    #[arg(long = "force", help = "Overwrite an existing file")]
    pub force: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StarterArg {
    /// One table, one page, two endpoints.
    Blank,
    /// Customers and companies with roles and a workflow.
    Crm,
}

impl From<StarterArg> for StarterBlueprint {
    fn from(arg: StarterArg) -> Self {
        match arg {
            StarterArg::Blank => Self::Blank,
            StarterArg::Crm => Self::Crm,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Yaml,
    Json,
}

impl From<FormatArg> for DocumentFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Yaml => Self::Yaml,
            FormatArg::Json => Self::Json,
        }
    }
}

// ── schema ────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct SchemaArgs {
    /// Entity to describe; omit to list all entities.
    #[arg(value_name = "ENTITY")]
    pub entity: Option<String>,

    #[arg(long = "family", value_enum, help = "Only list entities of this family")]
    pub family: Option<FamilyArg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FamilyArg {
    Blueprint,
    Tenant,
    User,
    Connector,
}

impl From<FamilyArg> for EntityFamily {
    fn from(arg: FamilyArg) -> Self {
        match arg {
            FamilyArg::Blueprint => Self::Blueprint,
            FamilyArg::Tenant => Self::Tenant,
            FamilyArg::User => Self::User,
            FamilyArg::Connector => Self::Connector,
        }
    }
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `validation.max_depth`.
        key: String,
    },
    /// Print the effective configuration as TOML.
    List,
    /// Print the path of the configuration file.
    Path,
    /// Write the default configuration file.
    Init {
        #[arg(short = 'f', long = "force", help = "Overwrite an existing file")]
        force: bool,
    },
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_validate_with_contract() {
        let cli = Cli::parse_from([
            "appkod",
            "validate",
            "tenant.yaml",
            "--contract",
            "create-tenant-request",
        ]);
        let Commands::Validate(args) = cli.command else {
            panic!("expected validate command");
        };
        assert_eq!(args.file, Some(PathBuf::from("tenant.yaml")));
        assert_eq!(args.contract, Some(Entity::CreateTenantRequest));
    }

    #[test]
    fn unknown_contract_is_rejected_by_parser() {
        let result = Cli::try_parse_from(["appkod", "validate", "--contract", "widget"]);
        assert!(result.is_err());
    }

    #[test]
    fn init_defaults() {
        let cli = Cli::parse_from(["appkod", "init"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init command");
        };
        assert_eq!(args.template, StarterArg::Blank);
        assert_eq!(DocumentFormat::from(args.format), DocumentFormat::Yaml);
        assert!(!args.force);
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["appkod", "--quiet", "--verbose", "schema"]);
        assert!(result.is_err());
    }
}
