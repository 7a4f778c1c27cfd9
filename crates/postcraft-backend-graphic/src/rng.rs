//! Deterministic RNG and background source selection.
//!
//! Photo backgrounds are picked from a per-category list. The pick goes
//! through a [`SourceSelector`] so callers can choose between real randomness
//! and a reproducible choice.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Wrapper around PCG32 for deterministic random number generation.
#[derive(Clone)]
pub struct DeterministicRng {
    inner: Pcg32,
}

impl DeterministicRng {
    /// Create a new RNG from a 32-bit seed.
    ///
    /// The seed is expanded to 64 bits by duplicating the bits.
    pub fn new(seed: u32) -> Self {
        let seed64 = (seed as u64) | ((seed as u64) << 32);
        Self {
            inner: Pcg32::seed_from_u64(seed64),
        }
    }

    /// Derive a seed for a specific variant (e.g. a category name) using BLAKE3.
    pub fn derive_variant_seed(base_seed: u32, variant_id: &str) -> u32 {
        let mut input = Vec::with_capacity(4 + variant_id.len());
        input.extend_from_slice(&base_seed.to_le_bytes());
        input.extend_from_slice(variant_id.as_bytes());
        let hash = blake3::hash(&input);
        let bytes = hash.as_bytes();
        u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    /// Generate a random value in the given range.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.inner.gen_range(range)
    }
}

/// Strategy for picking one entry out of a category's background list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceSelector {
    /// Uniformly random on every call.
    #[default]
    Random,
    /// Reproducible pick derived from a seed and the category name.
    Seeded(u32),
    /// Always the given index (modulo the list length).
    Fixed(usize),
}

impl SourceSelector {
    /// Pick an index in `0..len` for `category`. Returns `None` if `len == 0`.
    pub fn pick(&self, category: &str, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let index = match *self {
            SourceSelector::Random => rand::thread_rng().gen_range(0..len),
            SourceSelector::Seeded(seed) => {
                let seed = DeterministicRng::derive_variant_seed(seed, category);
                DeterministicRng::new(seed).gen_range(0..len)
            }
            SourceSelector::Fixed(index) => index % len,
        };
        Some(index)
    }
}
