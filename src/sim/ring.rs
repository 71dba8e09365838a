//! Ring entity: one expanding annulus of the rain

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::RainConfig;

/// Current drawable area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from signed window-system dimensions, clamping negatives to zero
    pub fn from_signed(width: i32, height: i32) -> Self {
        Self::new(width.max(0) as u32, height.max(0) as u32)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A single expanding double-ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ring {
    /// Center in screen pixels (fixed for the ring's life)
    pub center: IVec2,
    /// Leading edge of the band
    pub outer_radius: i32,
    /// Trailing edge of the band
    pub inner_radius: i32,
    /// Pixels per tick added to `outer_radius`
    pub outer_rate: i32,
    /// Pixels per tick added to `inner_radius`
    pub inner_rate: i32,
    /// Position on the 0-255 color wheel
    pub hue: u8,
}

impl Ring {
    /// Roll a new ring somewhere inside `viewport`
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, viewport: Viewport, config: &RainConfig) -> Self {
        let inner_rate = rng.random_range(config.inner_rate.min..config.inner_rate.max);
        let outer_radius = rng.random_range(config.outer_radius.min..config.outer_radius.max);
        let gap = rng.random_range(config.radius_gap.min..config.radius_gap.max);
        let divisor_pct =
            rng.random_range(config.outer_divisor_pct.min..config.outer_divisor_pct.max);

        // Zero-sized axes pin the center to the origin
        let x = random_coord(rng, viewport.width);
        let y = random_coord(rng, viewport.height);

        Self {
            center: IVec2::new(x, y),
            outer_radius,
            inner_radius: (outer_radius - gap).max(1),
            outer_rate: (inner_rate as f32 / (divisor_pct as f32 / 100.0)) as i32,
            inner_rate,
            hue: rng.random_range(0..=u8::MAX),
        }
    }

    /// Inner edge has caught the outer edge; the ring is done
    #[inline]
    pub fn is_spent(&self) -> bool {
        self.inner_radius >= self.outer_radius
    }

    /// Width of the band in pixels
    #[inline]
    pub fn band_width(&self) -> i32 {
        self.outer_radius - self.inner_radius
    }

    /// Radii drawn this frame, one concentric circle each
    pub fn radii(&self) -> std::ops::Range<i32> {
        self.inner_radius..self.outer_radius
    }

    /// Grow both edges by one tick.
    ///
    /// With `closing_gap` the inner edge slows down as it nears the outer
    /// edge, so the glow band thins out instead of vanishing abruptly.
    pub fn advance(&mut self, closing_gap: bool) {
        if closing_gap {
            let rate_diff = self.inner_rate - self.outer_rate;
            if rate_diff > 1 && self.band_width() < rate_diff * 10 {
                self.inner_rate -= 1;
            }
        }

        self.inner_radius = self.inner_radius.saturating_add(self.inner_rate);
        self.outer_radius = self.outer_radius.saturating_add(self.outer_rate);
    }
}

/// Uniform coordinate in `[0, extent)`, clamped to what a ring center can hold
fn random_coord<R: Rng + ?Sized>(rng: &mut R, extent: u32) -> i32 {
    let extent = extent.min(i32::MAX as u32);
    if extent == 0 {
        0
    } else {
        rng.random_range(0..extent) as i32
    }
}
