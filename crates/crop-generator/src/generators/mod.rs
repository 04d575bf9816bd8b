//! Individual field generators.
//!
//! Each generator draws one field of a crop record from its closed set or
//! range using the caller's RNG.

pub mod choice;
pub mod dates;
pub mod numeric;

pub use choice::choose;
pub use dates::{generate_harvest_date, generate_planting_date, shift_days};
pub use numeric::generate_yield;
