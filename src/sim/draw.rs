//! Draw calls emitted by the simulation for a rendering surface to consume

use glam::Vec2;

use crate::color::{ChannelRange, Rgb};

/// One instruction for the rendering surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCall {
    /// Set the pen color for the circles that follow
    Color { rgb: Rgb, alpha: f32 },
    /// Outline of a circle at `center` (screen pixels)
    Circle { center: Vec2, radius: f32 },
}

/// Ordered draw calls for a single frame.
///
/// The list carries the channel range its consumer wants colors in.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    calls: Vec<DrawCall>,
    range: ChannelRange,
}

impl DrawList {
    pub fn new(range: ChannelRange) -> Self {
        Self {
            calls: Vec::new(),
            range,
        }
    }

    /// Range that `DrawCall::Color` channels are expressed in
    pub fn range(&self) -> ChannelRange {
        self.range
    }

    pub fn set_color(&mut self, rgb: Rgb, alpha: f32) {
        self.calls.push(DrawCall::Color { rgb, alpha });
    }

    pub fn circle(&mut self, center: Vec2, radius: f32) {
        self.calls.push(DrawCall::Circle { center, radius });
    }

    /// Drop last frame's calls, keeping the allocation
    pub fn clear(&mut self) {
        self.calls.clear();
    }

    pub fn calls(&self) -> &[DrawCall] {
        &self.calls
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    /// Number of circle outlines in the frame
    pub fn circle_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }

    /// Circles paired with the unit-range RGBA color in effect for each
    pub fn colored_circles(&self) -> impl Iterator<Item = (Vec2, f32, [f32; 4])> + '_ {
        let range = self.range;
        let mut color = [1.0; 4];
        self.calls.iter().filter_map(move |call| match *call {
            DrawCall::Color { rgb, alpha } => {
                color = rgb.to_unit(range).with_alpha(alpha);
                None
            }
            DrawCall::Circle { center, radius } => Some((center, radius, color)),
        })
    }
}
