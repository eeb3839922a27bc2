//! Shared utilities and data generators for all benchmarks
//!
//! This module provides:
//! - Synthetic key generators (uniform and binomial)
//! - Common benchmark constants (sizes, densities)
//!
//! Key sets are described by a count and a density exponent: `n` keys
//! drawn from `[0, n * 10^exp]`, so a higher exponent means sparser data.
#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Binomial, Distribution};

// DATA GENERATORS

fn max_value(count: usize, exp: u32) -> u64 {
    count as u64 * 10u64.pow(exp)
}

/// `count` keys sampled uniformly from `[0, count * 10^exp]`
///
/// Seeded so every run of a benchmark sees the same keys.
pub fn uniform_data(count: usize, exp: u32, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max = max_value(count, exp);
    (0..count).map(|_| rng.gen_range(0..=max)).collect()
}

/// `count` keys from a binomial distribution over `[0, count * 10^exp]`
/// with success probability 0.75
///
/// Keys cluster around `0.75 * max`, the dense-in-the-middle case that
/// favors block-sparse sets.
pub fn binomial_data(count: usize, exp: u32, seed: u64) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let max = max_value(count, exp);
    match Binomial::new(max, 0.75) {
        Ok(distribution) => (0..count).map(|_| distribution.sample(&mut rng)).collect(),
        Err(_) => uniform_data(count, exp, seed),
    }
}

/// Uniform keys, sorted ascending for the batched insert paths
pub fn sorted_uniform_data(count: usize, exp: u32, seed: u64) -> Vec<u64> {
    let mut keys = uniform_data(count, exp, seed);
    keys.sort_unstable();
    keys
}

// BENCHMARK PARAMETERS

/// Number of keys per set
pub const SIZES: &[usize] = &[1_000, 10_000, 100_000];

/// Density exponents: keys drawn from `[0, n * 10^exp]`
pub const DENSITIES: &[u32] = &[1, 2, 3];

/// Block size used for the sparse sets under test
pub const BLOCK: usize = 65_536;
