//! The crop record and its growth stage enumeration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage format for dates (`YYYY-MM-DD`), sortable as text.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Growth stage of a crop.
///
/// Deserialization goes through [`FromStr`], so YAML and JSON accept the same
/// spellings as manual entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum GrowthStage {
    Seedling,
    Vegetative,
    Flowering,
    Fruiting,
    Maturity,
}

impl GrowthStage {
    /// All stages in agronomic order.
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Seedling,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::Fruiting,
        GrowthStage::Maturity,
    ];

    /// Name as stored in the `growth_stage` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            GrowthStage::Seedling => "Seedling",
            GrowthStage::Vegetative => "Vegetative",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::Fruiting => "Fruiting",
            GrowthStage::Maturity => "Maturity",
        }
    }
}

impl fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown growth stage name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownGrowthStage(pub String);

impl fmt::Display for UnknownGrowthStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown growth stage '{}'", self.0)
    }
}

impl std::error::Error for UnknownGrowthStage {}

impl FromStr for GrowthStage {
    type Err = UnknownGrowthStage;

    /// Case-insensitive; "Germination" is accepted as an alias of `Seedling`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("germination") {
            return Ok(GrowthStage::Seedling);
        }
        GrowthStage::ALL
            .into_iter()
            .find(|stage| stage.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownGrowthStage(s.to_string()))
    }
}

impl TryFrom<String> for GrowthStage {
    type Error = UnknownGrowthStage;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// A crop record before it is handed to the store.
///
/// The surrogate `id` is not part of the record; it is assigned by the store
/// on insert and only appears on [`StoredCrop`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecord {
    pub crop_name: String,
    pub planting_date: NaiveDate,
    pub harvest_date: NaiveDate,
    pub growth_stage: GrowthStage,
    pub pest_control_measure: String,
    /// Predicted yield in kilograms.
    pub yield_prediction: u32,
}

impl CropRecord {
    /// Days between planting and harvest.
    pub fn season_days(&self) -> i64 {
        (self.harvest_date - self.planting_date).num_days()
    }

    /// Row-level check mirrored by the SQL `CHECK` constraints.
    pub fn check_row(&self) -> Result<(), String> {
        if self.harvest_date <= self.planting_date {
            return Err(format!(
                "harvest_date {} is not after planting_date {}",
                self.harvest_date, self.planting_date
            ));
        }
        if self.crop_name.is_empty() || self.pest_control_measure.is_empty() {
            return Err("crop_name and pest_control_measures must not be empty".to_string());
        }
        Ok(())
    }
}

/// A persisted record together with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredCrop {
    pub id: i64,
    #[serde(flatten)]
    pub record: CropRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(planting: &str, harvest: &str) -> CropRecord {
        CropRecord {
            crop_name: "Wheat".to_string(),
            planting_date: NaiveDate::parse_from_str(planting, DATE_FORMAT).unwrap(),
            harvest_date: NaiveDate::parse_from_str(harvest, DATE_FORMAT).unwrap(),
            growth_stage: GrowthStage::Flowering,
            pest_control_measure: "Crop rotation".to_string(),
            yield_prediction: 1200,
        }
    }

    #[test]
    fn test_growth_stage_parse() {
        assert_eq!("seedling".parse::<GrowthStage>(), Ok(GrowthStage::Seedling));
        assert_eq!(" Maturity ".parse::<GrowthStage>(), Ok(GrowthStage::Maturity));
        assert_eq!("Germination".parse::<GrowthStage>(), Ok(GrowthStage::Seedling));
        assert!("Dormant".parse::<GrowthStage>().is_err());
    }

    #[test]
    fn test_growth_stage_display_matches_storage_name() {
        for stage in GrowthStage::ALL {
            assert_eq!(stage.to_string().parse::<GrowthStage>(), Ok(stage));
        }
    }

    #[test]
    fn test_season_days() {
        assert_eq!(record("2024-03-01", "2024-06-29").season_days(), 120);
    }

    #[test]
    fn test_check_row_rejects_same_day_harvest() {
        assert!(record("2024-03-01", "2024-03-01").check_row().is_err());
        assert!(record("2024-03-01", "2024-03-02").check_row().is_ok());
    }

    #[test]
    fn test_stored_crop_serializes_flat() {
        let stored = StoredCrop {
            id: 7,
            record: record("2024-03-01", "2024-06-29"),
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["crop_name"], "Wheat");
        assert_eq!(json["planting_date"], "2024-03-01");
        assert_eq!(json["growth_stage"], "Flowering");
    }

    #[test]
    fn test_growth_stage_deserializes_case_insensitively() {
        let stage: GrowthStage = serde_json::from_str("\"germination\"").unwrap();
        assert_eq!(stage, GrowthStage::Seedling);
        let stage: GrowthStage = serde_json::from_str("\"fruiting\"").unwrap();
        assert_eq!(stage, GrowthStage::Fruiting);
        assert!(serde_json::from_str::<GrowthStage>("\"Dormant\"").is_err());
    }
}
