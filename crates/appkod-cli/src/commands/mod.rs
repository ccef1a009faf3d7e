//! One module per subcommand. Each exposes an `execute` entry point.

pub mod completions;
pub mod config;
pub mod init;
pub mod schema;
pub mod validate;
