//! Planting and harvest date generators.

use chrono::{NaiveDate, TimeDelta};
use crop_core::{HarvestOffset, PlantingWindow};
use rand::Rng;

/// Move `date` by `days`, or `None` when the result is not a valid date.
pub fn shift_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    TimeDelta::try_days(days).and_then(|delta| date.checked_add_signed(delta))
}

/// Generate a planting date uniformly within the window around `today`.
///
/// The window must have been checked against `today` with [`shift_days`].
pub fn generate_planting_date<R: Rng>(
    rng: &mut R,
    today: NaiveDate,
    window: &PlantingWindow,
) -> NaiveDate {
    let offset = rng.gen_range(window.start_offset_days..=window.end_offset_days);
    shift_days(today, offset).unwrap_or(today)
}

/// Generate a harvest date `min..=max` days after planting.
pub fn generate_harvest_date<R: Rng>(
    rng: &mut R,
    planting: NaiveDate,
    offset: &HarvestOffset,
) -> NaiveDate {
    let days = rng.gen_range(offset.min..=offset.max);
    shift_days(planting, days).unwrap_or(planting)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    #[test]
    fn test_planting_date_in_window() {
        let mut rng = StdRng::seed_from_u64(42);
        let window = PlantingWindow {
            start_offset_days: -730,
            end_offset_days: 0,
        };

        let earliest = NaiveDate::from_ymd_opt(2023, 3, 16).unwrap();
        for _ in 0..500 {
            let date = generate_planting_date(&mut rng, today(), &window);
            assert!(date >= earliest && date <= today(), "{date} outside window");
        }
    }

    #[test]
    fn test_harvest_offset_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let offset = HarvestOffset { min: 60, max: 180 };

        for _ in 0..500 {
            let harvest = generate_harvest_date(&mut rng, today(), &offset);
            let days = (harvest - today()).num_days();
            assert!((60..=180).contains(&days));
        }
    }

    #[test]
    fn test_shift_days_overflow() {
        assert_eq!(shift_days(today(), 1), NaiveDate::from_ymd_opt(2025, 3, 16));
        assert!(shift_days(today(), i64::MAX).is_none());
        assert!(shift_days(NaiveDate::MAX, 1).is_none());
    }

    #[test]
    fn test_deterministic_generation() {
        let window = PlantingWindow {
            start_offset_days: -365,
            end_offset_days: 0,
        };
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        assert_eq!(
            generate_planting_date(&mut rng1, today(), &window),
            generate_planting_date(&mut rng2, today(), &window)
        );
    }
}
