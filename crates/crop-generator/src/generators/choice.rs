//! Uniform choice from a closed set.

use rand::Rng;

/// Pick one entry uniformly at random.
///
/// Returns `None` only for an empty set, which a validated domain never has.
pub fn choose<'a, T, R: Rng>(rng: &mut R, values: &'a [T]) -> Option<&'a T> {
    if values.is_empty() {
        None
    } else {
        let idx = rng.gen_range(0..values.len());
        values.get(idx)
    }
}
