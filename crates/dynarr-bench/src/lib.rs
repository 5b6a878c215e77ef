//! Benchmark workloads for dynarr.
//!
//! Deterministic inputs for the Criterion benches, seeded through
//! `ChaCha8Rng` so every run measures identical data:
//!
//! - [`random_values`]: element values in a bounded range
//! - [`random_indices`]: in-bounds positions for a shrinking or growing array
//! - [`filled_array`]: an array pre-loaded with `0..len`

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dynarr::DynamicArray;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` values drawn uniformly from `0..distinct`.
///
/// A small `distinct` makes `find` and `remove` hit frequently.
pub fn random_values(count: usize, distinct: i32, seed: u64) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..count).map(|_| rng.random_range(0..distinct)).collect()
}

/// `count` indices where the `i`-th is valid for an array of size
/// `start_len + i * step`, with `step` either `1` (growing) or `-1`
/// (shrinking).
///
/// Returns an empty vector if a shrinking sequence would run out of
/// elements.
pub fn random_indices(count: usize, start_len: usize, step: isize, seed: u64) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut len = start_len as isize;
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        if len <= 0 {
            return Vec::new();
        }
        out.push(rng.random_range(0..len as usize));
        len += step;
    }
    out
}

/// An array holding `0..len`.
///
/// # Panics
///
/// Panics if the global allocator cannot provide the store.
pub fn filled_array(len: usize) -> DynamicArray<i32> {
    let values: Vec<i32> = (0..len as i32).collect();
    DynamicArray::from_slice(&values).expect("benchmark array allocation")
}
