//! Tracing subscriber initialisation.
//!
//! Only the binary installs a subscriber; `appkod-core` and `appkod-adapters`
//! emit spans and events and nothing else.
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides the table. Events always go to stderr, as JSON lines
//! under `--output-format json` so both streams stay machine-readable.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{GlobalArgs, OutputFormat};

/// Targets that get the level derived from the flags.
const TARGETS: [&str; 3] = ["appkod", "appkod_core", "appkod_adapters"];

pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(derive_level(args))));

    let registry = tracing_subscriber::registry().with(filter);
    let layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if args.output_format == OutputFormat::Json {
        registry
            .with(layer.json().with_current_span(false).with_span_list(false))
            .try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(layer.with_ansi(ansi)).try_init()
    };

    installed.map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))
}

fn default_directives(level: &str) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn level_follows_flags() {
        assert_eq!(derive_level(&args_with(0, false)), "warn");
        assert_eq!(derive_level(&args_with(1, false)), "info");
        assert_eq!(derive_level(&args_with(2, false)), "debug");
        assert_eq!(derive_level(&args_with(10, false)), "trace");
    }

    #[test]
    fn quiet_wins_over_verbose() {
        assert_eq!(derive_level(&args_with(0, true)), "error");
        assert_eq!(derive_level(&args_with(3, true)), "error");
    }

    #[test]
    fn directives_cover_every_workspace_crate() {
        assert_eq!(
            default_directives("debug"),
            "appkod=debug,appkod_core=debug,appkod_adapters=debug"
        );
    }
}
