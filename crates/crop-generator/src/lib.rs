//! Synthetic record generation for crop-sync.
//!
//! This crate provides the [`CropGenerator`], which draws schema-valid crop
//! records from a [`FieldDomain`](crop_core::FieldDomain), and the chunk
//! assembler that feeds the bulk loader. The generator uses a seeded RNG so
//! runs with the same seed and reference date are reproducible.
//!
//! # Architecture
//!
//! ```text
//! FieldDomain (presets or YAML)
//!        │
//!        ▼
//! ┌─────────────────┐
//! │  CropGenerator  │
//! │                 │
//! │  - domain       │
//! │  - rng (StdRng) │
//! │  - today        │
//! └────────┬────────┘
//!          │  assemble(total, chunk_size)
//!          ▼
//!    Chunks ─► Vec<CropRecord> ─► Vec<CropRecord> ─► ...
//! ```
//!
//! # Example
//!
//! ```rust
//! use crop_core::FieldDomain;
//! use crop_generator::{assemble, CropGenerator};
//!
//! let mut generator = CropGenerator::new(FieldDomain::standard(), 42).unwrap();
//! let sizes: Vec<usize> = assemble(&mut generator, 25_000, 10_000)
//!     .unwrap()
//!     .map(|chunk| chunk.len())
//!     .collect();
//! assert_eq!(sizes, vec![10_000, 10_000, 5_000]);
//! ```

pub mod chunks;
pub mod generator;
pub mod generators;

// Re-exports for convenience
pub use chunks::{assemble, chunk_count, Chunks, DEFAULT_CHUNK_SIZE};
pub use generator::{CropGenerator, Records};
