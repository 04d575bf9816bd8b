//! Bulk ingestion pipeline for crop-sync.
//!
//! This crate ties the generator to a persistent store:
//!
//! - [`CropGateway`] - the store boundary, implemented once per store technology
//! - [`BulkLoader`] - chunked, transactional loading with progress and
//!   per-chunk failure capture
//! - [`ProgressSink`] - receiver of cumulative progress
//! - [`insert_one`] - the validated manual insert path
//! - [`InMemoryGateway`] - an in-process store for tests and embedding
//!
//! # Example
//!
//! ```ignore
//! use crop_core::FieldDomain;
//! use crop_generator::CropGenerator;
//! use crop_loader::{BulkLoader, InMemoryGateway, LoadRequest, LogProgress};
//!
//! let gateway = InMemoryGateway::new();
//! let mut loader = BulkLoader::new(CropGenerator::new(FieldDomain::standard(), 42)?);
//! let result = loader
//!     .load(LoadRequest::new(25_000), &gateway, &LogProgress::default())
//!     .await?;
//! assert!(result.is_success());
//! ```

pub mod args;
pub mod gateway;
pub mod loader;
pub mod manual;
pub mod memory;
pub mod progress;

pub use args::{CommonLoadArgs, DomainArgs, DomainPreset};
pub use gateway::{CropGateway, DEFAULT_RECENT_LIMIT, TABLE_NAME};
pub use loader::{BulkLoader, FailedChunk, LoadMetrics, LoadRequest, LoadResult};
pub use manual::{insert_one, InsertError};
pub use memory::InMemoryGateway;
pub use progress::{LogProgress, NoProgress, ProgressSink};
