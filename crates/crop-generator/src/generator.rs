//! Field domain generator producing synthetic crop records.

use crate::generators::{
    choose, generate_harvest_date, generate_planting_date, generate_yield, shift_days,
};
use chrono::{NaiveDate, Utc};
use crop_core::{ConfigurationError, CropRecord, FieldDomain, GrowthStage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Generator of schema-valid synthetic crop records.
///
/// All randomness comes from the injected RNG, so two generators built from
/// the same domain, seed and `today` produce identical sequences.
pub struct CropGenerator<R = StdRng> {
    /// Validated domain the records are drawn from
    domain: FieldDomain,
    /// Random source
    rng: R,
    /// Reference date for the planting window
    today: NaiveDate,
    /// Number of records generated so far
    generated: u64,
}

impl CropGenerator<StdRng> {
    /// Create a generator seeded with `seed`, anchored at the current UTC date.
    pub fn new(domain: FieldDomain, seed: u64) -> Result<Self, ConfigurationError> {
        Self::with_rng(domain, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> CropGenerator<R> {
    /// Create a generator with an explicit random source.
    ///
    /// The domain is validated here; generation itself cannot fail.
    pub fn with_rng(domain: FieldDomain, rng: R) -> Result<Self, ConfigurationError> {
        let today = Utc::now().date_naive();
        domain.validate()?;
        check_dates(&domain, today)?;
        Ok(Self {
            domain,
            rng,
            today,
            generated: 0,
        })
    }

    /// Pin the reference date of the planting window.
    pub fn with_today(mut self, today: NaiveDate) -> Result<Self, ConfigurationError> {
        check_dates(&self.domain, today)?;
        self.today = today;
        Ok(self)
    }

    /// Generate one record.
    pub fn generate(&mut self) -> CropRecord {
        let crop_name = pick(&mut self.rng, &self.domain.crop_names);
        let growth_stage = choose(&mut self.rng, &self.domain.growth_stages)
            .copied()
            .unwrap_or(GrowthStage::Seedling);
        let pest_control_measure = pick(&mut self.rng, &self.domain.pest_measures);
        let planting_date =
            generate_planting_date(&mut self.rng, self.today, &self.domain.planting_window);
        let harvest_date =
            generate_harvest_date(&mut self.rng, planting_date, &self.domain.harvest_offset);
        let yield_prediction = generate_yield(&mut self.rng, &self.domain.yield_range);

        self.generated += 1;

        CropRecord {
            crop_name,
            planting_date,
            harvest_date,
            growth_stage,
            pest_control_measure,
            yield_prediction,
        }
    }

    /// Lazily generate `count` records.
    pub fn records(&mut self, count: u64) -> Records<'_, R> {
        Records {
            generator: self,
            remaining: count,
        }
    }

    /// Number of records generated so far.
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Reference date of the planting window.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn domain(&self) -> &FieldDomain {
        &self.domain
    }
}

fn pick<R: Rng>(rng: &mut R, values: &[String]) -> String {
    choose(rng, values).cloned().unwrap_or_default()
}

/// Reject windows and offsets that would leave the calendar.
fn check_dates(domain: &FieldDomain, today: NaiveDate) -> Result<(), ConfigurationError> {
    let window = &domain.planting_window;
    shift_days(today, window.start_offset_days).ok_or(ConfigurationError::DateOutOfRange {
        name: "planting_window",
        days: window.start_offset_days,
    })?;
    let latest = shift_days(today, window.end_offset_days).ok_or(
        ConfigurationError::DateOutOfRange {
            name: "planting_window",
            days: window.end_offset_days,
        },
    )?;
    shift_days(latest, domain.harvest_offset.max).ok_or(ConfigurationError::DateOutOfRange {
        name: "harvest_offset",
        days: domain.harvest_offset.max,
    })?;
    Ok(())
}

/// Iterator that lazily generates records.
pub struct Records<'a, R> {
    generator: &'a mut CropGenerator<R>,
    remaining: u64,
}

impl<R: Rng> Iterator for Records<'_, R> {
    type Item = CropRecord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.generator.generate())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Records<'_, R> {}
