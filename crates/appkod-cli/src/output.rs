//! Output management and formatting.
//!
//! Everything a command prints to stdout goes through [`OutputManager`], so
//! `--quiet`, `--no-color` and `--output-format` are honoured in one place.

use std::io::{self, IsTerminal};

use clap::ValueEnum;
use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use appkod_core::domain::ValidationReport;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Build an `OutputManager` from parsed CLI flags and loaded config.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        // An explicit flag wins; otherwise the configured format, which may itself be auto.
        let requested = if args.output_format == OutputFormat::Auto {
            OutputFormat::from_str(&config.output.format, true).unwrap_or(OutputFormat::Auto)
        } else {
            args.output_format
        };

        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    // ── Public write methods ───────────────────────────────────────────────

    /// Generic message; suppressed in quiet mode.
    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    /// Success indicator: `✓ <msg>`.
    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}") // ✓
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    /// Error indicator: `✗ <msg>`. Never suppressed, even in quiet mode.
    pub fn error(&self, msg: &str) -> io::Result<()> {
        let line = if self.no_color {
            format!("\u{2717} {msg}") // ✗
        } else {
            format!("{} {}", "\u{2717}".red().bold(), msg.red())
        };
        self.term.write_line(&line)
    }

    /// Warning indicator: `⚠ <msg>`.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}") // ⚠
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    /// Informational indicator: `ℹ <msg>`.
    pub fn info(&self, msg: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2139} {msg}") // ℹ
        } else {
            format!("{} {}", "\u{2139}".blue().bold(), msg.blue())
        };
        self.term.write_line(&line)
    }

    /// Bold cyan header line.
    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Aligned `key: value` line under a header.
    pub fn field(&self, key: &str, value: impl std::fmt::Display) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let key = format!("{key}:");
        let line = if self.no_color {
            format!("  {key:<13}{value}")
        } else {
            format!("  {:<13}{value}", key.dimmed())
        };
        self.term.write_line(&line)
    }

    /// Numbered `path: message` lines, one per issue. Never suppressed.
    pub fn issues(&self, report: &ValidationReport) -> io::Result<()> {
        for (index, issue) in report.iter().enumerate() {
            let number = format!("{}.", index + 1);
            let line = if self.no_color {
                format!("{number} {}: {}", issue.path, issue.message)
            } else {
                format!(
                    "{} {}: {}",
                    number.dimmed(),
                    issue.path.to_string().yellow(),
                    issue.message
                )
            };
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    /// Pretty JSON on stdout. Not suppressed: JSON output is the result itself.
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) -> io::Result<()> {
        let text = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        self.term.write_line(&text)
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn is_json(&self) -> bool {
        self.resolved_format == OutputFormat::Json
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
