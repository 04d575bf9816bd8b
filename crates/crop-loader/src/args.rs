//! Common CLI argument definitions shared by every store adapter.

use clap::{Args, ValueEnum};
use crop_core::{ConfigurationError, FieldDomain};
use crop_generator::DEFAULT_CHUNK_SIZE;
use std::path::PathBuf;

use crate::loader::LoadRequest;

/// Built-in field domains.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DomainPreset {
    /// Ten crops, five growth stages, 500-5000 kg yields
    #[default]
    Standard,
    /// Six grain crops, four growth stages, 100-1000 kg yields
    Compact,
}

impl DomainPreset {
    pub fn domain(self) -> FieldDomain {
        match self {
            DomainPreset::Standard => FieldDomain::standard(),
            DomainPreset::Compact => FieldDomain::compact(),
        }
    }
}

/// The closed sets and ranges records are drawn from and checked against.
#[derive(Args, Clone, Debug)]
pub struct DomainArgs {
    /// Path to a field domain YAML file (overrides --preset)
    #[arg(long, env = "CROP_DOMAIN_FILE")]
    pub domain: Option<PathBuf>,

    /// Built-in field domain to use when no domain file is given
    #[arg(long, value_enum, default_value_t = DomainPreset::Standard)]
    pub preset: DomainPreset,
}

impl DomainArgs {
    /// Resolve and validate the field domain.
    pub fn field_domain(&self) -> Result<FieldDomain, ConfigurationError> {
        let domain = match &self.domain {
            Some(path) => FieldDomain::from_file(path)?,
            None => self.preset.domain(),
        };
        domain.validate()?;
        Ok(domain)
    }
}

/// Arguments of a bulk load, shared by all stores.
#[derive(Args, Clone, Debug)]
pub struct CommonLoadArgs {
    /// Number of records to generate
    #[arg(long, default_value = "10000")]
    pub count: u64,

    /// Records per transaction
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Random seed for deterministic generation (same seed = same data)
    #[arg(long, default_value = "42")]
    pub seed: u64,

    #[command(flatten)]
    pub domain: DomainArgs,

    /// Dry-run mode: validate configuration and plan chunks without touching the store
    #[arg(long)]
    pub dry_run: bool,
}

impl CommonLoadArgs {
    pub fn request(&self) -> LoadRequest {
        LoadRequest::new(self.count).with_chunk_size(self.chunk_size)
    }
}
