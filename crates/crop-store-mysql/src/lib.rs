//! MySQL store for crop-sync.
//!
//! Implements [`CropGateway`](crop_loader::CropGateway) on top of a
//! `mysql_async` connection pool. A chunk is committed in one transaction,
//! split into multi-row `INSERT` statements of at most
//! [`MAX_ROWS_PER_STATEMENT`] rows.

pub mod args;
mod error;
mod store;

pub use args::{MySqlLoadArgs, MySqlOpts};
pub use store::{build_insert, MySqlGateway, CREATE_TABLE_SQL, MAX_ROWS_PER_STATEMENT};
