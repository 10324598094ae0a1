//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Convert an sRGB channel (0-1) to linear. Frames are drawn through an sRGB
/// view, which encodes it back.
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// CSS-style `0xRRGGBB` colour with alpha, in linear space
pub fn hex(rgb: u32, alpha: f32) -> [f32; 4] {
    let channel = |shift: u32| srgb_to_linear(((rgb >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0), alpha]
}

/// Replace a colour's alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], alpha]
}

/// Site palette (sRGB hex, converted at use)
pub mod colors {
    /// Accent purple: focus rings, paddle glow
    pub const ACCENT: u32 = 0x6c63ff;
    /// Pink: ball glow, food
    pub const PINK: u32 = 0xff6fd8;
    pub const WHITE: u32 = 0xffffff;
    /// Game canvas background
    pub const GAME_BG: u32 = 0x0b0b1e;
    /// Empty snake cell
    pub const CELL: u32 = 0x1c1c3a;
    pub const SNAKE_HEAD: u32 = 0x9d97ff;
    pub const SNAKE_BODY: u32 = 0x6c63ff;
    /// Game-over flash
    pub const FLASH: u32 = 0xff3b5c;
}
