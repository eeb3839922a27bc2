//! Shared helpers for integration tests.

#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

/// Block size used by the large random scenarios.
pub const N: u64 = 65_536;

/// `len` keys drawn uniformly from `[0, max_value]` with a fixed seed.
pub fn generate_data(seed: u64, len: usize, max_value: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..=max_value)).collect()
}

/// Same as [`generate_data`], sorted ascending (duplicates kept).
pub fn generate_sorted(seed: u64, len: usize, max_value: u64) -> Vec<u64> {
    let mut keys = generate_data(seed, len, max_value);
    keys.sort_unstable();
    keys
}

pub fn reference(keys: &[u64]) -> BTreeSet<u64> {
    keys.iter().copied().collect()
}

pub fn intersection(a: &BTreeSet<u64>, b: &BTreeSet<u64>) -> Vec<u64> {
    a.intersection(b).copied().collect()
}

pub fn union(a: &BTreeSet<u64>, b: &BTreeSet<u64>) -> Vec<u64> {
    a.union(b).copied().collect()
}

pub fn difference(a: &BTreeSet<u64>, b: &BTreeSet<u64>) -> Vec<u64> {
    a.difference(b).copied().collect()
}

pub fn symmetric_difference(a: &BTreeSet<u64>, b: &BTreeSet<u64>) -> Vec<u64> {
    a.symmetric_difference(b).copied().collect()
}
