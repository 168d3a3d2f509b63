// Background color generators. Each strategy is a pure function of the
// random source; `generate_color` picks one strategy uniformly per call.

use std::fmt;

use crate::random::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorStrategy {
    Dark,
    Vibrant,
    Pastel,
    Neon,
    EarthTone,
    JewelTone,
}

impl ColorStrategy {
    pub const ALL: [ColorStrategy; 6] = [
        ColorStrategy::Dark,
        ColorStrategy::Vibrant,
        ColorStrategy::Pastel,
        ColorStrategy::Neon,
        ColorStrategy::EarthTone,
        ColorStrategy::JewelTone,
    ];

    pub fn random(rng: &mut impl RandomSource) -> Self {
        Self::ALL[rng.index(Self::ALL.len())]
    }

    pub fn generate(self, rng: &mut impl RandomSource) -> Rgb {
        match self {
            ColorStrategy::Dark => dark(rng),
            ColorStrategy::Vibrant => vibrant(rng),
            ColorStrategy::Pastel => pastel(rng),
            ColorStrategy::Neon => neon(rng),
            ColorStrategy::EarthTone => earth_tone(rng),
            ColorStrategy::JewelTone => jewel_tone(rng),
        }
    }
}

pub fn generate_color(rng: &mut impl RandomSource) -> Rgb {
    ColorStrategy::random(rng).generate(rng)
}

fn channel(rng: &mut impl RandomSource, below: u32) -> u8 {
    rng.below(below).min(255) as u8
}

/// Every channel 0–120.
pub fn dark(rng: &mut impl RandomSource) -> Rgb {
    Rgb::new(channel(rng, 121), channel(rng, 121), channel(rng, 121))
}

/// Fully random, with one channel forced to at least 150.
pub fn vibrant(rng: &mut impl RandomSource) -> Rgb {
    let mut c = [channel(rng, 256), channel(rng, 256), channel(rng, 256)];
    let hot = rng.index(3);
    c[hot] = c[hot].max(150 + channel(rng, 106));
    Rgb::new(c[0], c[1], c[2])
}

/// Every channel 150–255.
pub fn pastel(rng: &mut impl RandomSource) -> Rgb {
    Rgb::new(
        150 + channel(rng, 106),
        150 + channel(rng, 106),
        150 + channel(rng, 106),
    )
}

const NEON_BASES: [[f64; 3]; 6] = [
    [255.0, 0.0, 255.0],
    [0.0, 255.0, 255.0],
    [255.0, 255.0, 0.0],
    [255.0, 0.0, 128.0],
    [128.0, 255.0, 0.0],
    [0.0, 128.0, 255.0],
];

// amethyst, emerald, ruby, sapphire, topaz, indigo
const JEWEL_BASES: [[f64; 3]; 6] = [
    [128.0, 0.0, 128.0],
    [0.0, 100.0, 0.0],
    [220.0, 20.0, 60.0],
    [0.0, 0.0, 139.0],
    [255.0, 140.0, 0.0],
    [75.0, 0.0, 130.0],
];

fn perturb(base: [f64; 3], span: f64, rng: &mut impl RandomSource) -> Rgb {
    let mut out = [0u8; 3];
    for (o, b) in out.iter_mut().zip(base) {
        *o = (b + rng.signed(span)).clamp(0.0, 255.0).floor() as u8;
    }
    Rgb::new(out[0], out[1], out[2])
}

/// ±50 around one of six saturated bases.
pub fn neon(rng: &mut impl RandomSource) -> Rgb {
    let base = NEON_BASES[rng.index(NEON_BASES.len())];
    perturb(base, 100.0, rng)
}

/// ±40 around one of six gemstone bases.
pub fn jewel_tone(rng: &mut impl RandomSource) -> Rgb {
    let base = JEWEL_BASES[rng.index(JEWEL_BASES.len())];
    perturb(base, 80.0, rng)
}

struct EarthPalette {
    r: [u16; 3],
    g: [u16; 3],
    b: [u16; 3],
}

const EARTH_PALETTES: [EarthPalette; 4] = [
    // browns
    EarthPalette { r: [101, 67, 33], g: [67, 33, 16], b: [33, 16, 8] },
    // forest greens
    EarthPalette { r: [34, 68, 102], g: [85, 119, 153], b: [34, 51, 68] },
    // rust
    EarthPalette { r: [153, 102, 51], g: [102, 68, 34], b: [51, 34, 17] },
    // blue-grays
    EarthPalette { r: [68, 85, 102], g: [85, 102, 119], b: [102, 119, 136] },
];

/// One of three palette values per channel plus 0–49, capped at 255.
pub fn earth_tone(rng: &mut impl RandomSource) -> Rgb {
    let p = &EARTH_PALETTES[rng.index(EARTH_PALETTES.len())];
    let mut pick = |values: &[u16; 3]| {
        let v = values[rng.index(3)] + rng.below(50) as u16;
        v.min(255) as u8
    };
    let r = pick(&p.r);
    let g = pick(&p.g);
    let b = pick(&p.b);
    Rgb::new(r, g, b)
}
