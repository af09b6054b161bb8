//! Data generation utilities useful for testing.
use rand::distr::Alphanumeric;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::collections::HashSet;
use std::hash::Hash;

/// Provides capabilities to generate random values of the implementer-type.
pub trait Generate<R: Rng>: Sized {
    /// Parameters for data-generation specific for the type.
    type GenerateParams: Default;

    /// Generates a single random value of the type.
    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self;

    /// Generates a slice of **unique** random values of the type.
    fn generate_many(rng: &mut R, params: &Self::GenerateParams, size: usize) -> Box<[Self]>
    where
        Self: Hash + Eq,
    {
        let mut seen = HashSet::new();
        while seen.len() < size {
            seen.insert(Self::generate(rng, params));
        }
        seen.into_iter().collect()
    }
}

/// Parameters for [`Generate`] implementations that generate strings.
#[derive(Debug, Clone, Copy)]
pub struct StringParams {
    min_length: usize,
    max_length: usize,
}

impl StringParams {
    pub fn new(min_length: usize, max_length: usize) -> Self {
        debug_assert!(min_length >= 1, r#""min_length" must be >= 1"#);
        debug_assert!(
            min_length <= max_length,
            r#""min_length" must be <= "max_length""#
        );
        Self {
            min_length,
            max_length,
        }
    }
}

impl Default for StringParams {
    fn default() -> Self {
        Self {
            min_length: 1,
            max_length: 32,
        }
    }
}

impl<R: Rng> Generate<R> for String {
    type GenerateParams = StringParams;

    fn generate(rng: &mut R, params: &Self::GenerateParams) -> Self {
        let length = rng.random_range(params.min_length..=params.max_length);
        let iter = rng.sample_iter(&Alphanumeric);
        iter.take(length).map(char::from).collect()
    }
}

/// Generates unique keys paired with arbitrary values, ready to be fed to a table.
pub fn generate_entries<R: Rng>(
    rng: &mut R,
    size: usize,
    key_params: &StringParams,
    value_params: &StringParams,
) -> Box<[(String, String)]> {
    let keys = String::generate_many(rng, key_params, size).into_vec();
    keys.into_iter()
        .map(|key| {
            let value = String::generate(rng, value_params);
            (key, value)
        })
        .collect::<Vec<_>>()
        .into_boxed_slice()
}

/// A deterministic RNG so that failures are reproducible from the seed alone.
pub fn seeded_rng(seed: u64) -> ChaCha20Rng {
    ChaCha20Rng::seed_from_u64(seed)
}
