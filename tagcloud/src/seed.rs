//! Seeds and seeded random streams.
//!
//! Seed text is folded into a 64-bit FNV-1a hash that seeds a ChaCha8
//! generator, so a given seed yields the same stream on every platform.

use std::fmt;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Cloud-level random seed, either text or an integer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RandomSeed {
    Number(i64),
    Text(String),
}

impl RandomSeed {
    /// Empty text and `0` count as "no seed".
    pub fn is_set(&self) -> bool {
        match self {
            Self::Number(value) => *value != 0,
            Self::Text(text) => !text.is_empty(),
        }
    }
}

impl fmt::Display for RandomSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for RandomSeed {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RandomSeed {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RandomSeed {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

pub fn fnv1a(bytes: &[u8]) -> u64 {
    let mut state = FNV_OFFSET_BASIS;
    for byte in bytes {
        state ^= u64::from(*byte);
        state = state.wrapping_mul(FNV_PRIME);
    }
    state
}

pub fn seeded_rng(seed: &str) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(fnv1a(seed.as_bytes()))
}

/// Deterministic generator of unit draws in `[0, 1)` for `seed`.
pub fn seeded_generator(seed: &str) -> impl FnMut() -> f64 + use<> {
    let mut rng = seeded_rng(seed);
    move || rng.random::<f64>()
}
