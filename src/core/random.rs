//! Random draws used by the generators
//!
//! Every probabilistic decision in the city generator is a percent roll: a
//! uniform integer in `0..=100` compared against a threshold. Keeping the
//! helpers here makes the comparison operators explicit at each call site.

use rand::Rng;

/// Uniform integer in `0..=100`
#[inline]
pub fn percent_roll<R: Rng + ?Sized>(rng: &mut R) -> u32 {
    rng.gen_range(0..=100)
}

/// Uniform integer in the inclusive range `[min, max]`
///
/// Returns `min` when the range is empty, so callers deriving bounds from
/// grid arithmetic never panic.
#[inline]
pub fn range_inclusive<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if max <= min {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Uniform index into a slice of `len` elements
#[inline]
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    rng.gen_range(0..len)
}
