//! SQLite store for crop-sync.
//!
//! Implements [`CropGateway`](crop_loader::CropGateway) on top of `rusqlite`
//! with a bundled SQLite. Dates are stored as `YYYY-MM-DD` text, which sorts
//! and compares chronologically, so the `CHECK (harvest_date > planting_date)`
//! constraint can be enforced by the database itself.
//!
//! # Example
//!
//! ```ignore
//! use crop_loader::CropGateway;
//! use crop_store_sqlite::SqliteGateway;
//!
//! let gateway = SqliteGateway::open("crop_management.db")?;
//! gateway.ensure_table().await?;
//! let recent = gateway.query_recent(20).await?;
//! ```

pub mod args;
mod error;
mod store;

pub use args::{SqliteLoadArgs, SqliteOpts};
pub use store::{SqliteGateway, CREATE_TABLE_SQL};
