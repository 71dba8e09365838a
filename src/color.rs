//! HSL to RGB color mapping for ring tints
//!
//! Hue is expressed on a 0-255 wheel (one byte per ring), saturation and
//! lightness in [0, 1].

use serde::{Deserialize, Serialize};

/// Output range of the color channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ChannelRange {
    /// Channels in [0, 1] (floating point color APIs, GPU vertices)
    #[default]
    Unit,
    /// Channels in [0, 255] (integer color APIs)
    Byte,
}

impl ChannelRange {
    /// Largest channel value in this range
    pub fn scale(&self) -> f32 {
        match self {
            ChannelRange::Unit => 1.0,
            ChannelRange::Byte => 255.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChannelRange::Unit => "unit",
            ChannelRange::Byte => "byte",
        }
    }
}

/// An RGB triple in some [`ChannelRange`]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Re-express a color given in `from` as unit-range channels
    pub fn to_unit(self, from: ChannelRange) -> Self {
        let k = from.scale();
        Self::new(self.r / k, self.g / k, self.b / k)
    }

    /// Attach an alpha channel (alpha is always unit range)
    pub fn with_alpha(self, alpha: f32) -> [f32; 4] {
        [self.r, self.g, self.b, alpha]
    }

    /// Truncate byte-range channels to `u8`
    pub fn to_bytes(self) -> [u8; 3] {
        [
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        ]
    }
}

/// Convert a hue on the 0-255 wheel plus saturation/lightness to RGB.
///
/// Zero lightness or zero saturation collapses to the achromatic triple
/// `(l, l, l)`. Results are scaled to `range`.
pub fn hue_saturation_lightness_to_rgb(
    hue: f32,
    saturation: f32,
    lightness: f32,
    range: ChannelRange,
) -> Rgb {
    let k = range.scale();

    if lightness == 0.0 || saturation == 0.0 {
        let v = lightness * k;
        return Rgb::new(v, v, v);
    }

    let h = hue / 255.0;

    let q = if lightness < 0.5 {
        lightness * (1.0 + saturation)
    } else {
        lightness + saturation - lightness * saturation
    };
    let p = 2.0 * lightness - q;

    Rgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0) * k,
        hue_to_channel(p, q, h) * k,
        hue_to_channel(p, q, h - 1.0 / 3.0) * k,
    )
}

/// Piecewise ramp between `p` and `q` for one channel
fn hue_to_channel(p: f32, q: f32, mut h: f32) -> f32 {
    if h < 0.0 {
        h += 1.0;
    } else if h > 1.0 {
        h -= 1.0;
    }

    if 6.0 * h < 1.0 {
        p + (q - p) * 6.0 * h
    } else if 2.0 * h < 1.0 {
        q
    } else if 3.0 * h < 2.0 {
        p + (q - p) * (2.0 / 3.0 - h) * 6.0
    } else {
        p
    }
}
