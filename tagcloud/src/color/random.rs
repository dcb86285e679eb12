//! Hue/luminosity driven random colours.
//!
//! Colours are picked in HSV space: a hue from the requested hue's range, a
//! saturation from the range that hue looks good in, then a brightness above
//! the hue's lower-bound curve. Luminosity narrows the last two picks.

use rand::Rng;

use super::{ColorFormat, ColorGenerator, ColorOptions, Hue, Luminosity, NamedHue};
use crate::seed::seeded_rng;

struct HueInfo {
    name: NamedHue,
    hue_range: Option<(i32, i32)>,
    /// `(saturation, minimum brightness)` pairs, sorted by saturation.
    lower_bounds: &'static [(i32, i32)],
}

impl HueInfo {
    fn saturation_range(&self) -> (i32, i32) {
        match (self.lower_bounds.first(), self.lower_bounds.last()) {
            (Some(first), Some(last)) => (first.0, last.0),
            _ => (0, 100),
        }
    }

    fn minimum_brightness(&self, saturation: i32) -> i32 {
        for pair in self.lower_bounds.windows(2) {
            let (s1, v1) = pair[0];
            let (s2, v2) = pair[1];
            if saturation >= s1 && saturation <= s2 {
                let slope = f64::from(v2 - v1) / f64::from(s2 - s1);
                let intercept = f64::from(v1) - slope * f64::from(s1);
                return (slope * f64::from(saturation) + intercept) as i32;
            }
        }
        0
    }
}

static HUES: [HueInfo; 8] = [
    HueInfo {
        name: NamedHue::Monochrome,
        hue_range: None,
        lower_bounds: &[(0, 0), (100, 0)],
    },
    HueInfo {
        name: NamedHue::Red,
        hue_range: Some((-26, 18)),
        lower_bounds: &[
            (20, 100),
            (30, 92),
            (40, 89),
            (50, 85),
            (60, 78),
            (70, 70),
            (80, 60),
            (90, 55),
            (100, 50),
        ],
    },
    HueInfo {
        name: NamedHue::Orange,
        hue_range: Some((18, 46)),
        lower_bounds: &[
            (20, 100),
            (30, 93),
            (40, 88),
            (50, 86),
            (60, 85),
            (70, 70),
            (100, 70),
        ],
    },
    HueInfo {
        name: NamedHue::Yellow,
        hue_range: Some((46, 62)),
        lower_bounds: &[
            (25, 100),
            (40, 94),
            (50, 89),
            (60, 86),
            (70, 84),
            (80, 82),
            (90, 80),
            (100, 75),
        ],
    },
    HueInfo {
        name: NamedHue::Green,
        hue_range: Some((62, 178)),
        lower_bounds: &[
            (30, 100),
            (40, 90),
            (50, 85),
            (60, 81),
            (70, 74),
            (80, 64),
            (90, 50),
            (100, 40),
        ],
    },
    HueInfo {
        name: NamedHue::Blue,
        hue_range: Some((178, 257)),
        lower_bounds: &[
            (20, 100),
            (30, 86),
            (40, 80),
            (50, 74),
            (60, 60),
            (70, 52),
            (80, 44),
            (90, 39),
            (100, 35),
        ],
    },
    HueInfo {
        name: NamedHue::Purple,
        hue_range: Some((257, 282)),
        lower_bounds: &[
            (20, 100),
            (30, 87),
            (40, 79),
            (50, 70),
            (60, 65),
            (70, 59),
            (80, 52),
            (90, 45),
            (100, 42),
        ],
    },
    HueInfo {
        name: NamedHue::Pink,
        hue_range: Some((282, 334)),
        lower_bounds: &[
            (20, 100),
            (30, 90),
            (40, 86),
            (60, 84),
            (80, 80),
            (90, 75),
            (100, 73),
        ],
    },
];

fn named(name: NamedHue) -> &'static HueInfo {
    HUES.iter()
        .find(|info| info.name == name)
        .unwrap_or(&HUES[1])
}

/// Hue table entry covering `hue` (degrees, `[0, 360]`).
fn info_for(hue: i32) -> &'static HueInfo {
    let hue = if (334..=360).contains(&hue) { hue - 360 } else { hue };
    HUES.iter()
        .filter_map(|info| info.hue_range.map(|range| (info, range)))
        .find(|(_, (low, high))| hue >= *low && hue <= *high)
        .map(|(info, _)| info)
        .unwrap_or(&HUES[1])
}

fn random_within<R: Rng>(rng: &mut R, (low, high): (i32, i32)) -> i32 {
    if high <= low {
        return low;
    }
    rng.random_range(low..=high)
}

/// The default colour generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomColor;

impl RandomColor {
    pub fn pick<R: Rng>(rng: &mut R, options: &ColorOptions) -> String {
        let hue = pick_hue(rng, options);
        let saturation = pick_saturation(rng, hue, options);
        let brightness = pick_brightness(rng, hue, saturation, options);
        format_color(rng, (hue, saturation, brightness), options)
    }
}

impl ColorGenerator for RandomColor {
    fn generate(&self, seed: Option<&str>, options: &ColorOptions) -> String {
        match seed {
            Some(seed) => Self::pick(&mut seeded_rng(seed), options),
            None => Self::pick(&mut rand::rng(), options),
        }
    }
}

fn pick_hue<R: Rng>(rng: &mut R, options: &ColorOptions) -> i32 {
    let range = match options.hue {
        Some(Hue::Named(name)) => named(name).hue_range.unwrap_or((0, 360)),
        Some(Hue::Degrees(degrees)) if (0.0..=360.0).contains(&degrees) => {
            let degrees = degrees.round() as i32;
            (degrees, degrees)
        }
        _ => (0, 360),
    };

    let hue = random_within(rng, range);
    if hue < 0 { hue + 360 } else { hue }
}

fn pick_saturation<R: Rng>(rng: &mut R, hue: i32, options: &ColorOptions) -> i32 {
    if options.hue == Some(Hue::Named(NamedHue::Monochrome)) {
        return 0;
    }
    if options.luminosity == Some(Luminosity::Random) {
        return random_within(rng, (0, 100));
    }

    let (mut low, mut high) = info_for(hue).saturation_range();
    match options.luminosity {
        Some(Luminosity::Bright) => low = 55,
        Some(Luminosity::Dark) => low = high - 10,
        Some(Luminosity::Light) => high = 55,
        _ => {}
    }
    random_within(rng, (low, high))
}

fn pick_brightness<R: Rng>(
    rng: &mut R,
    hue: i32,
    saturation: i32,
    options: &ColorOptions,
) -> i32 {
    let mut low = info_for(hue).minimum_brightness(saturation);
    let mut high = 100;
    match options.luminosity {
        Some(Luminosity::Dark) => high = low + 20,
        Some(Luminosity::Light) => low = (high + low) / 2,
        Some(Luminosity::Random) => {
            low = 0;
            high = 100;
        }
        _ => {}
    }
    random_within(rng, (low, high.min(100)))
}

fn hsv_to_rgb((hue, saturation, value): (i32, i32, i32)) -> (u8, u8, u8) {
    // Keep hue inside one sextant of the wheel at both ends.
    let hue = hue.clamp(1, 359);
    let h = f64::from(hue) / 360.0;
    let s = f64::from(saturation) / 100.0;
    let v = f64::from(value) / 100.0;

    let sector = (h * 6.0).floor();
    let f = h * 6.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    let (r, g, b) = match sector as i32 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };
    let channel = |c: f64| (c * 255.0).floor().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

fn hsv_to_hsl((hue, saturation, value): (i32, i32, i32)) -> (i32, f64, f64) {
    let s = f64::from(saturation) / 100.0;
    let v = f64::from(value) / 100.0;
    let k = (2.0 - s) * v;
    let denominator = if k < 1.0 { k } else { 2.0 - k };
    let hsl_saturation = if denominator == 0.0 {
        0.0
    } else {
        (s * v / denominator * 10000.0).round() / 100.0
    };
    (hue, hsl_saturation, k / 2.0 * 100.0)
}

fn format_color<R: Rng>(
    rng: &mut R,
    hsv: (i32, i32, i32),
    options: &ColorOptions,
) -> String {
    let mut alpha = || {
        options
            .alpha
            .unwrap_or_else(|| rng.random::<f64>())
            .clamp(0.0, 1.0)
    };

    match options.format {
        ColorFormat::Hex => {
            let (r, g, b) = hsv_to_rgb(hsv);
            format!("#{r:02x}{g:02x}{b:02x}")
        }
        ColorFormat::Rgb => {
            let (r, g, b) = hsv_to_rgb(hsv);
            format!("rgb({r}, {g}, {b})")
        }
        ColorFormat::Rgba => {
            let (r, g, b) = hsv_to_rgb(hsv);
            format!("rgba({r}, {g}, {b}, {:.2})", alpha())
        }
        ColorFormat::Hsl => {
            let (h, s, l) = hsv_to_hsl(hsv);
            format!("hsl({h}, {s:.2}%, {l:.2}%)")
        }
        ColorFormat::Hsla => {
            let (h, s, l) = hsv_to_hsl(hsv);
            format!("hsla({h}, {s:.2}%, {l:.2}%, {:.2})", alpha())
        }
    }
}
