//! Shape generation for 2D primitives
//!
//! Shapes are built in canvas pixel space (origin top-left, y down) and
//! mapped to clip space by `Viewport`.

use glam::Vec2;
use std::f32::consts::TAU;

use super::vertex::{Vertex, with_alpha};

/// Canvas size used to map pixels to normalized device coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }

    /// Pixel position to NDC (-1..1, y up)
    pub fn to_ndc(&self, p: Vec2) -> Vec2 {
        Vec2::new(p.x / self.width * 2.0 - 1.0, 1.0 - p.y / self.height * 2.0)
    }
}

/// Accumulates triangles in pixel space
#[derive(Debug, Default)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    fn push(&mut self, p: Vec2, color: [f32; 4]) {
        self.vertices.push(Vertex::new(p.x, p.y, color));
    }

    /// Axis-aligned rectangle from its top-left corner
    pub fn rect(&mut self, origin: Vec2, size: Vec2, color: [f32; 4]) {
        let a = origin;
        let b = origin + Vec2::new(size.x, 0.0);
        let c = origin + size;
        let d = origin + Vec2::new(0.0, size.y);
        self.push(a, color);
        self.push(b, color);
        self.push(c, color);
        self.push(a, color);
        self.push(c, color);
        self.push(d, color);
    }

    /// Filled circle as a triangle fan
    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        let segments = circle_segments(radius);
        for i in 0..segments {
            let a0 = i as f32 / segments as f32 * TAU;
            let a1 = (i + 1) as f32 / segments as f32 * TAU;
            self.push(center, color);
            self.push(center + Vec2::new(a0.cos(), a0.sin()) * radius, color);
            self.push(center + Vec2::new(a1.cos(), a1.sin()) * radius, color);
        }
    }

    /// Soft halo around a circle, approximating a canvas `shadowBlur`
    pub fn glow_circle(&mut self, center: Vec2, radius: f32, blur: f32, color: [f32; 4], layers: u32) {
        for i in (1..=layers).rev() {
            let t = i as f32 / layers as f32;
            let alpha = color[3] * 0.35 * (1.0 - t) + 0.05;
            self.circle(center, radius + blur * t, with_alpha(color, alpha));
        }
    }

    /// Soft halo around a rectangle
    pub fn glow_rect(&mut self, origin: Vec2, size: Vec2, blur: f32, color: [f32; 4], layers: u32) {
        for i in (1..=layers).rev() {
            let t = i as f32 / layers as f32;
            let grow = Vec2::splat(blur * t);
            let alpha = color[3] * 0.35 * (1.0 - t) + 0.05;
            self.rect(origin - grow, size + grow * 2.0, with_alpha(color, alpha));
        }
    }

    /// Thick line with a colour gradient from `from` to `to`
    pub fn streak(&mut self, from: Vec2, to: Vec2, width: f32, from_color: [f32; 4], to_color: [f32; 4]) {
        let dir = (to - from).normalize_or_zero();
        if dir == Vec2::ZERO {
            return;
        }
        let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);
        self.push(from + perp, from_color);
        self.push(from - perp, from_color);
        self.push(to + perp, to_color);
        self.push(to + perp, to_color);
        self.push(from - perp, from_color);
        self.push(to - perp, to_color);
    }

    /// Finish the batch, mapping every vertex into clip space
    pub fn into_ndc(self, viewport: Viewport) -> Vec<Vertex> {
        self.vertices
            .into_iter()
            .map(|v| {
                let p = viewport.to_ndc(Vec2::from(v.position));
                Vertex::new(p.x, p.y, v.color)
            })
            .collect()
    }

    /// Vertices still in pixel space
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
}

/// Enough segments to look round at the given pixel radius
fn circle_segments(radius: f32) -> u32 {
    ((radius * 4.0) as u32).clamp(8, 48)
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: [f32; 4] = [1.0; 4];

    #[test]
    fn test_viewport_corners() {
        let vp = Viewport::new(480.0, 320.0);
        assert_eq!(vp.to_ndc(Vec2::ZERO), Vec2::new(-1.0, 1.0));
        assert_eq!(vp.to_ndc(Vec2::new(480.0, 320.0)), Vec2::new(1.0, -1.0));
        assert_eq!(vp.to_ndc(Vec2::new(240.0, 160.0)), Vec2::ZERO);
    }

    #[test]
    fn test_rect_is_two_triangles() {
        let mut batch = ShapeBatch::new();
        batch.rect(Vec2::new(0.0, 10.0), Vec2::new(10.0, 60.0), WHITE);
        assert_eq!(batch.len(), 6);
        let ys: Vec<f32> = batch.vertices().iter().map(|v| v.position[1]).collect();
        assert!(ys.iter().all(|&y| (10.0..=70.0).contains(&y)));
    }

    #[test]
    fn test_circle_stays_within_radius() {
        let mut batch = ShapeBatch::new();
        let center = Vec2::new(50.0, 50.0);
        batch.circle(center, 8.0, WHITE);
        assert_eq!(batch.len() % 3, 0);
        for v in batch.vertices() {
            assert!(Vec2::from(v.position).distance(center) <= 8.0 + 1e-3);
        }
    }

    #[test]
    fn test_glow_layers() {
        let mut batch = ShapeBatch::new();
        batch.glow_circle(Vec2::ZERO, 8.0, 15.0, WHITE, 0);
        assert!(batch.is_empty());
        batch.glow_rect(Vec2::ZERO, Vec2::new(10.0, 60.0), 10.0, WHITE, 3);
        assert_eq!(batch.len(), 18);
        assert!(batch.vertices().iter().all(|v| v.color[3] < 1.0));
    }

    #[test]
    fn test_degenerate_streak_is_skipped() {
        let mut batch = ShapeBatch::new();
        batch.streak(Vec2::ONE, Vec2::ONE, 2.0, WHITE, WHITE);
        assert!(batch.is_empty());
    }
}
