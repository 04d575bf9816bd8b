//! Manually entered records.

use crate::domain::FieldDomain;
use crate::error::ValidationError;
use crate::record::{CropRecord, GrowthStage, DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date formats accepted on manual entry, tried in order.
///
/// `%m/%d/%y` is what calendar date pickers emit.
const ACCEPTED_DATE_FORMATS: [&str; 2] = [DATE_FORMAT, "%m/%d/%y"];

/// The raw text of a manual entry form.
///
/// Every field is required; `None` and blank strings are both treated as
/// missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManualEntry {
    pub crop_name: Option<String>,
    pub planting_date: Option<String>,
    pub harvest_date: Option<String>,
    pub growth_stage: Option<String>,
    pub pest_control_measure: Option<String>,
    pub yield_prediction: Option<String>,
}

impl ManualEntry {
    /// Validate the entry against `domain` and build a record.
    ///
    /// Presence of every field is checked before any value is parsed, so a
    /// form with blanks always reports the first missing field.
    pub fn validate(&self, domain: &FieldDomain) -> Result<CropRecord, ValidationError> {
        let crop_name = required("crop_name", &self.crop_name)?;
        let planting_date = required("planting_date", &self.planting_date)?;
        let harvest_date = required("harvest_date", &self.harvest_date)?;
        let growth_stage = required("growth_stage", &self.growth_stage)?;
        let pest_control_measure = required("pest_control_measure", &self.pest_control_measure)?;
        let yield_prediction = required("yield_prediction", &self.yield_prediction)?;

        let planting = parse_date("planting_date", planting_date)?;
        let harvest = parse_date("harvest_date", harvest_date)?;
        if harvest <= planting {
            return Err(ValidationError::HarvestBeforePlanting {
                planting: planting.format(DATE_FORMAT).to_string(),
                harvest: harvest.format(DATE_FORMAT).to_string(),
            });
        }

        let stage: GrowthStage = growth_stage
            .parse()
            .map_err(|_| ValidationError::UnknownGrowthStage(growth_stage.to_string()))?;
        if !domain.has_growth_stage(stage) {
            return Err(ValidationError::NotInDomain {
                field: "growth_stage",
                value: growth_stage.to_string(),
            });
        }
        if !domain.has_crop(crop_name) {
            return Err(ValidationError::NotInDomain {
                field: "crop_name",
                value: crop_name.to_string(),
            });
        }
        if !domain.has_pest_measure(pest_control_measure) {
            return Err(ValidationError::NotInDomain {
                field: "pest_control_measure",
                value: pest_control_measure.to_string(),
            });
        }

        let yield_kg: u32 = yield_prediction
            .parse()
            .map_err(|_| ValidationError::InvalidYield(yield_prediction.to_string()))?;

        Ok(CropRecord {
            crop_name: crop_name.to_string(),
            planting_date: planting,
            harvest_date: harvest,
            growth_stage: stage,
            pest_control_measure: pest_control_measure.to_string(),
            yield_prediction: yield_kg,
        })
    }
}

fn required<'a>(
    field: &'static str,
    value: &'a Option<String>,
) -> Result<&'a str, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, ValidationError> {
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        })
}
