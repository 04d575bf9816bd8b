//! Command handlers.
//!
//! One module per subcommand. Each `run_*` function opens whatever it needs
//! and returns an `anyhow` error with context for the CLI to print.

pub mod bulk;
pub mod generate;
pub mod init;
pub mod insert;
pub mod logging;
pub mod recent;
