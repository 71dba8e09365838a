//! Shape generation for circle outlines

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::Vertex;
use crate::sim::DrawList;

/// Boundary points of a regular polygon approximating a circle.
///
/// Points are produced by repeatedly rotating the previous one, starting at
/// angle 0. The iterator is `Clone`, so a copy taken before iterating
/// restarts the sweep.
#[derive(Debug, Clone)]
pub struct CircleOutline {
    center: Vec2,
    /// Current offset from the center
    offset: Vec2,
    cos: f32,
    sin: f32,
    remaining: u32,
}

impl Iterator for CircleOutline {
    type Item = Vec2;

    fn next(&mut self) -> Option<Vec2> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let point = self.center + self.offset;
        let Vec2 { x, y } = self.offset;
        self.offset = Vec2::new(self.cos * x - self.sin * y, self.sin * x + self.cos * y);
        Some(point)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining as usize, Some(self.remaining as usize))
    }
}

impl ExactSizeIterator for CircleOutline {}

/// Outline of a circle as `segments` ordered points (none for zero segments)
pub fn circle_outline(center: Vec2, radius: f32, segments: u32) -> CircleOutline {
    let theta = if segments == 0 { 0.0 } else { TAU / segments as f32 };
    CircleOutline {
        center,
        offset: Vec2::new(radius, 0.0),
        cos: theta.cos(),
        sin: theta.sin(),
        remaining: segments,
    }
}

/// Map screen pixels (origin top-left, y down) to clip space
#[inline]
pub fn screen_to_ndc(p: Vec2, size: (u32, u32)) -> Vec2 {
    let w = size.0.max(1) as f32;
    let h = size.1.max(1) as f32;
    Vec2::new(2.0 * p.x / w - 1.0, 1.0 - 2.0 * p.y / h)
}

/// Append a closed loop through `points` as line-list vertex pairs
pub fn line_loop<I>(points: I, color: [f32; 4], vertices: &mut Vec<Vertex>)
where
    I: IntoIterator<Item = Vec2>,
{
    let mut points = points.into_iter();
    let Some(first) = points.next() else {
        return;
    };

    let mut prev = first;
    for p in points {
        vertices.push(Vertex::new(prev.x, prev.y, color));
        vertices.push(Vertex::new(p.x, p.y, color));
        prev = p;
    }
    if prev != first {
        vertices.push(Vertex::new(prev.x, prev.y, color));
        vertices.push(Vertex::new(first.x, first.y, color));
    }
}

/// Line-list vertices for every circle in a frame's draw list
pub fn draw_list_vertices(list: &DrawList, size: (u32, u32), segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(list.circle_count() * segments as usize * 2);

    for (center, radius, color) in list.colored_circles() {
        let outline = circle_outline(center, radius, segments).map(|p| screen_to_ndc(p, size));
        line_loop(outline, color, &mut vertices);
    }

    vertices
}
