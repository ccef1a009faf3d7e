//! Flags shared by every subcommand, flattened into [`super::Cli`].

use clap::Args;
use std::path::PathBuf;

/// Global arguments for all commands.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Logging verbosity. Any `-v` also turns on `validate --summary`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity (logs go to stderr):
    (none)  - Warnings and errors
    -v      - Info; `validate` also prints the summary or applied defaults
    -vv     - Debug; each validation issue is logged as it is found
    -vvv    - Trace"
    )]
    pub verbose: u8,

    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Only print errors and validation issues"
    )]
    pub quiet: bool,

    /// Honours `NO_COLOR` (<https://no-color.org>).
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        env = "APPKOD_CONFIG",
        help = "Read settings from FILE instead of the user config"
    )]
    pub config: Option<PathBuf>,

    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format; `auto` defers to `output.format` in config"
    )]
    pub output_format: OutputFormat,
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from config, else human on a terminal and plain otherwise.
    #[default]
    Auto,
    Human,
    Plain,
    /// Results as JSON on stdout. Given as a flag, logs become JSON lines too.
    Json,
}
