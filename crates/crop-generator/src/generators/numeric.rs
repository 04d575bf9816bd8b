//! Yield generator.

use crop_core::YieldRange;
use rand::Rng;

/// Generate a predicted yield in kilograms, inclusive of both bounds.
pub fn generate_yield<R: Rng>(rng: &mut R, range: &YieldRange) -> u32 {
    rng.gen_range(range.min..=range.max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_yield() {
        let mut rng = StdRng::seed_from_u64(42);
        let range = YieldRange { min: 100, max: 1000 };

        for _ in 0..500 {
            let value = generate_yield(&mut rng, &range);
            assert!((100..=1000).contains(&value));
        }
    }
}
