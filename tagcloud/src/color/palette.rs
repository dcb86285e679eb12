//! Static palette for tag colouring. Values are expressed in CSS OKLCH
//! notation so hosts can apply them directly.

use rand::Rng;

use super::{ColorGenerator, ColorOptions};
use crate::seed::fnv1a;

const PALETTE: [&str; 16] = [
    "oklch(0.78 0.20 25)",
    "oklch(0.80 0.19 55)",
    "oklch(0.82 0.18 90)",
    "oklch(0.83 0.17 120)",
    "oklch(0.82 0.16 150)",
    "oklch(0.80 0.17 180)",
    "oklch(0.79 0.18 210)",
    "oklch(0.78 0.19 235)",
    "oklch(0.77 0.20 260)",
    "oklch(0.78 0.19 285)",
    "oklch(0.80 0.18 310)",
    "oklch(0.81 0.18 330)",
    "oklch(0.83 0.17 345)",
    "oklch(0.84 0.16 10)",
    "oklch(0.82 0.18 40)",
    "oklch(0.79 0.19 70)",
];

/// Picks colours from a fixed 16-entry palette. Options are ignored.
#[derive(Clone, Copy, Debug, Default)]
pub struct FixedPalette;

impl FixedPalette {
    /// Palette entry for an arbitrary index, wrapping around.
    #[inline]
    pub fn color_for(index: u64) -> &'static str {
        PALETTE[(index % PALETTE.len() as u64) as usize]
    }
}

impl ColorGenerator for FixedPalette {
    fn generate(&self, seed: Option<&str>, _options: &ColorOptions) -> String {
        let index = match seed {
            Some(seed) => fnv1a(seed.as_bytes()),
            None => rand::rng().random_range(0..PALETTE.len() as u64),
        };
        Self::color_for(index).to_string()
    }
}
