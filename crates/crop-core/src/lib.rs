//! Core types for crop-sync.
//!
//! This crate provides the foundational types shared by the generator, the
//! bulk loader and the store adapters:
//!
//! - [`CropRecord`] - A crop record before insertion
//! - [`StoredCrop`] - A persisted record with its store-assigned id
//! - [`GrowthStage`] - Closed set of growth stages
//! - [`FieldDomain`] - Closed sets and ranges records are drawn from
//! - [`ManualEntry`] - Raw form input for the manual insert path
//!
//! # Architecture
//!
//! ```text
//! crop-core (this crate)
//!    │
//!    ├─── crop-generator      (draws CropRecords from a FieldDomain)
//!    │
//!    ├─── crop-loader         (gateway trait, bulk loader, manual insert)
//!    │
//!    ├─── crop-store-sqlite   (CropGateway for SQLite)
//!    └─── crop-store-mysql    (CropGateway for MySQL)
//! ```

pub mod domain;
pub mod error;
pub mod manual;
pub mod record;

// Re-exports for convenience
pub use domain::{FieldDomain, HarvestOffset, PlantingWindow, YieldRange};
pub use error::{ConfigurationError, StoreError, ValidationError};
pub use manual::ManualEntry;
pub use record::{CropRecord, GrowthStage, StoredCrop, DATE_FORMAT};
