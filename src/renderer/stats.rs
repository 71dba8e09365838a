//! Frame statistics surface for hosts without a GPU

use crate::sim::{DrawCall, DrawList};

/// Running totals of what would have been drawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frames: u64,
    pub color_calls: u64,
    pub circle_calls: u64,
    /// Circles in the most recent frame
    pub last_circles: usize,
    /// Rings (color calls) in the most recent frame
    pub last_rings: usize,
}

impl FrameStats {
    /// Consume one frame's draw list and "present" it
    pub fn present(&mut self, list: &DrawList) {
        let mut rings = 0;
        let mut circles = 0;
        for call in list.calls() {
            match call {
                DrawCall::Color { .. } => rings += 1,
                DrawCall::Circle { .. } => circles += 1,
            }
        }

        self.frames += 1;
        self.color_calls += rings as u64;
        self.circle_calls += circles as u64;
        self.last_rings = rings;
        self.last_circles = circles;
    }

    /// Average circles per frame so far
    pub fn mean_circles(&self) -> f64 {
        if self.frames == 0 {
            0.0
        } else {
            self.circle_calls as f64 / self.frames as f64
        }
    }
}
