//! Field domain: the closed sets and ranges a crop record is drawn from.
//!
//! A domain can be built from one of the presets or loaded from YAML. Keys
//! missing from the YAML fall back to the `standard` preset:
//!
//! ```yaml
//! crop_names: [Wheat, Rice, Maize]
//! growth_stages: [Seedling, Vegetative, Maturity]
//! pest_measures: [Crop rotation, Neem oil application]
//! planting_window:
//!   start_offset_days: -365
//!   end_offset_days: 0
//! harvest_offset:
//!   min: 60
//!   max: 180
//! yield_range:
//!   min: 500
//!   max: 5000
//! ```

use crate::error::ConfigurationError;
use crate::record::GrowthStage;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Planting dates are drawn from `[today + start_offset_days, today + end_offset_days]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantingWindow {
    pub start_offset_days: i64,
    pub end_offset_days: i64,
}

/// Inclusive range of days between planting and harvest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestOffset {
    pub min: i64,
    pub max: i64,
}

/// Inclusive range of predicted yields in kilograms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YieldRange {
    pub min: u32,
    pub max: u32,
}

/// Configuration of every field the generator draws from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldDomain {
    pub crop_names: Vec<String>,
    pub growth_stages: Vec<GrowthStage>,
    pub pest_measures: Vec<String>,
    pub planting_window: PlantingWindow,
    pub harvest_offset: HarvestOffset,
    pub yield_range: YieldRange,
}

impl Default for FieldDomain {
    fn default() -> Self {
        Self::standard()
    }
}

impl FieldDomain {
    /// Large-scale preset: ten crops, six pest measures, 500-5000 kg yields,
    /// planting within the past two years.
    pub fn standard() -> Self {
        Self {
            crop_names: to_strings(&[
                "Wheat",
                "Rice",
                "Corn",
                "Soybean",
                "Barley",
                "Sugarcane",
                "Cotton",
                "Potato",
                "Tomato",
                "Lettuce",
            ]),
            growth_stages: GrowthStage::ALL.to_vec(),
            pest_measures: to_strings(&[
                "Use of organic pesticides",
                "Crop rotation",
                "Neem oil application",
                "Biological pest control",
                "Chemical pesticides",
                "Regular field monitoring",
            ]),
            planting_window: PlantingWindow {
                start_offset_days: -730,
                end_offset_days: 0,
            },
            harvest_offset: HarvestOffset { min: 60, max: 180 },
            yield_range: YieldRange { min: 500, max: 5000 },
        }
    }

    /// Small-scale preset: six grain crops, three pest measures and
    /// 100-1000 kg yields.
    pub fn compact() -> Self {
        Self {
            crop_names: to_strings(&["Wheat", "Rice", "Maize", "Barley", "Millet", "Soybean"]),
            growth_stages: vec![
                GrowthStage::Seedling,
                GrowthStage::Vegetative,
                GrowthStage::Flowering,
                GrowthStage::Maturity,
            ],
            pest_measures: to_strings(&["Pesticide", "Neem Oil", "Biological Control"]),
            yield_range: YieldRange { min: 100, max: 1000 },
            ..Self::standard()
        }
    }

    /// Parse a domain from YAML and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigurationError> {
        let domain: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigurationError::Yaml(e.to_string()))?;
        domain.validate()?;
        Ok(domain)
    }

    /// Load a domain from a YAML file and validate it.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigurationError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigurationError::Io(format!("{}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    /// Check that every set is non-empty and duplicate-free and every range
    /// is well-formed.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        check_set("crop_names", self.crop_names.iter().map(String::as_str))?;
        check_set("growth_stages", self.growth_stages.iter().map(|s| s.as_str()))?;
        check_set("pest_measures", self.pest_measures.iter().map(String::as_str))?;

        check_range(
            "planting_window",
            self.planting_window.start_offset_days,
            self.planting_window.end_offset_days,
        )?;
        if self.harvest_offset.min <= 0 {
            return Err(ConfigurationError::NonPositiveHarvestOffset(
                self.harvest_offset.min,
            ));
        }
        check_range(
            "harvest_offset",
            self.harvest_offset.min,
            self.harvest_offset.max,
        )?;
        check_range(
            "yield_range",
            i64::from(self.yield_range.min),
            i64::from(self.yield_range.max),
        )?;
        Ok(())
    }

    pub fn has_crop(&self, name: &str) -> bool {
        self.crop_names.iter().any(|c| c == name)
    }

    pub fn has_growth_stage(&self, stage: GrowthStage) -> bool {
        self.growth_stages.contains(&stage)
    }

    pub fn has_pest_measure(&self, measure: &str) -> bool {
        self.pest_measures.iter().any(|m| m == measure)
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn check_set<'a>(
    set: &'static str,
    entries: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigurationError> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert(entry) {
            return Err(ConfigurationError::DuplicateEntry {
                set,
                entry: entry.to_string(),
            });
        }
    }
    if seen.is_empty() {
        return Err(ConfigurationError::EmptySet(set));
    }
    Ok(())
}

fn check_range(name: &'static str, min: i64, max: i64) -> Result<(), ConfigurationError> {
    if min >= max {
        return Err(ConfigurationError::InvalidRange { name, min, max });
    }
    Ok(())
}
