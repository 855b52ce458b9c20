use std::fmt;

use rand::Rng;
use serde::{Serialize, Serializer};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Rec. 601 luma, used to pick readable label ink.
    pub fn luma(self) -> u32 {
        (299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b)) / 1000
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub const BASE_COLORS: [Rgb; 15] = [
    Rgb::from_hex(0xf6e58d),
    Rgb::from_hex(0xff7979),
    Rgb::from_hex(0xbadc58),
    Rgb::from_hex(0x7ed6df),
    Rgb::from_hex(0xe056fd),
    Rgb::from_hex(0x686de0),
    Rgb::from_hex(0x30336b),
    Rgb::from_hex(0x95afc0),
    Rgb::from_hex(0xf9ca24),
    Rgb::from_hex(0xf0932b),
    Rgb::from_hex(0xeb4d4b),
    Rgb::from_hex(0x6ab04c),
    Rgb::from_hex(0x22a6b3),
    Rgb::from_hex(0xbe2edd),
    Rgb::from_hex(0x4834d4),
];

/// Fallback tile colors, rotated once when the process starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    /// Base colors rotated left by `shift` (taken modulo the palette size).
    pub fn rotated(shift: usize) -> Self {
        let mut colors = BASE_COLORS.to_vec();
        colors.rotate_left(shift % BASE_COLORS.len());
        Self { colors }
    }

    /// Rotation drawn uniformly from `[0, len)`.
    pub fn startup<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let shift = rng.gen_range(0..BASE_COLORS.len());
        log::debug!("fallback palette rotated by {}", shift);
        Self::rotated(shift)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    /// Color for the block at `index` in the session's distinct block names.
    /// Indices past the end wrap around.
    pub fn color_for(&self, index: usize) -> Rgb {
        self.colors[index % self.colors.len()]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::rotated(0)
    }
}
