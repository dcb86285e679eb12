//! Colour assignment for tags.

mod palette;
mod random;

use serde::{Deserialize, Serialize};

use crate::config::CloudConfig;
use crate::tag::Tag;

pub use palette::FixedPalette;
pub use random::RandomColor;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NamedHue {
    Monochrome,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Purple,
    Pink,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Hue {
    Named(NamedHue),
    Degrees(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Luminosity {
    Bright,
    Light,
    Dark,
    Random,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
}

/// Palette parameters handed verbatim to the colour generator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<Hue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub luminosity: Option<Luminosity>,
    #[serde(default)]
    pub format: ColorFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f64>,
}

/// Source of display colours.
///
/// With a seed the result must depend on nothing but the seed and the
/// options. Without one the generator draws from its own entropy.
pub trait ColorGenerator {
    fn generate(&self, seed: Option<&str>, options: &ColorOptions) -> String;
}

/// Display colour for `tag`: its pinned colour, nothing when random colours
/// are disabled, or a generated one. Seeded clouds seed each tag with
/// `"{seed}:{hash}"`.
pub fn assign_color(
    tag: &Tag,
    config: &CloudConfig,
    generator: &dyn ColorGenerator,
) -> Option<String> {
    if let Some(color) = &tag.color {
        return Some(color.clone());
    }
    if config.disable_random_color {
        return None;
    }

    let seed = config
        .active_seed()
        .map(|seed| format!("{seed}:{}", tag.hash_code()));
    Some(generator.generate(seed.as_deref(), &config.color_options))
}
