//! CLI argument definitions for the SQLite store.

use clap::Args;
use std::path::PathBuf;

pub use crop_loader::CommonLoadArgs;

/// SQLite database options.
#[derive(Args, Clone, Debug)]
pub struct SqliteOpts {
    /// Path to the SQLite database file (created if missing)
    #[arg(long, env = "CROP_SQLITE_PATH", default_value = "crop_management.db")]
    pub sqlite_path: PathBuf,
}

/// SQLite-specific bulk load arguments.
#[derive(Args, Clone, Debug)]
pub struct SqliteLoadArgs {
    #[command(flatten)]
    pub opts: SqliteOpts,

    #[command(flatten)]
    pub common: CommonLoadArgs,
}
