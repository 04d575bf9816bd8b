//! Error taxonomy shared by the generator, the loader and the store adapters.

use thiserror::Error;

/// Invalid generator or assembler parameters.
///
/// Always detected before any I/O takes place.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    /// A closed set (crop names, growth stages, pest measures) has no entries.
    #[error("'{0}' must contain at least one entry")]
    EmptySet(&'static str),

    /// A closed set lists the same entry twice.
    #[error("'{set}' contains duplicate entry '{entry}'")]
    DuplicateEntry { set: &'static str, entry: String },

    /// A range whose lower bound is not strictly below its upper bound.
    #[error("'{name}' range is invalid: min ({min}) must be less than max ({max})")]
    InvalidRange { name: &'static str, min: i64, max: i64 },

    /// The harvest offset must be a positive number of days.
    #[error("'harvest_offset' min must be a positive number of days, got {0}")]
    NonPositiveHarvestOffset(i64),

    /// A day offset that moves a date outside the representable calendar.
    #[error("'{name}' offset of {days} days is outside the supported date range")]
    DateOutOfRange { name: &'static str, days: i64 },

    /// Chunk size of zero.
    #[error("chunk size must be a positive integer")]
    ZeroChunkSize,

    /// Domain file could not be read.
    #[error("Failed to read domain file: {0}")]
    Io(String),

    /// Domain file is not valid YAML for a field domain.
    #[error("Failed to parse domain YAML: {0}")]
    Yaml(String),
}

/// A missing or malformed field on the manual insert path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was absent or blank.
    #[error("field '{0}' is required")]
    MissingField(&'static str),

    /// A date field that could not be parsed.
    #[error("field '{field}' is not a valid date: '{value}'")]
    InvalidDate { field: &'static str, value: String },

    /// Harvest date on or before planting date.
    #[error("harvest date {harvest} must be after planting date {planting}")]
    HarvestBeforePlanting { planting: String, harvest: String },

    /// Growth stage outside the known stages.
    #[error("unknown growth stage '{0}'")]
    UnknownGrowthStage(String),

    /// A value not present in its configured closed set.
    #[error("'{value}' is not an allowed {field}")]
    NotInDomain { field: &'static str, value: String },

    /// Yield that is not a non-negative integer number of kilograms.
    #[error("yield prediction must be a non-negative integer, got '{0}'")]
    InvalidYield(String),
}

/// Failure at the gateway boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Connection could not be acquired or was lost.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A row was rejected by a table constraint.
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// Statement or commit failure; the transaction was rolled back.
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// A stored row could not be decoded into a record.
    #[error("Failed to decode stored row: {0}")]
    Decode(String),
}
