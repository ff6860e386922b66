//! Vertex type for world-space coloured triangles

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// World-space vertex with straight (non-premultiplied) RGBA colour
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(position: Vec3, color: [f32; 4]) -> Self {
        Self {
            position: [position.x, position.y, position.z],
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
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Placeholder material colours (sRGB)
pub mod colors {
    pub const AVATAR_TYPING: [f32; 4] = [0.30, 0.75, 0.45, 1.0];
    pub const AVATAR_STANDING: [f32; 4] = [0.35, 0.45, 0.90, 1.0];
    pub const AVATAR_FALLING: [f32; 4] = [0.95, 0.55, 0.20, 1.0];
    pub const AVATAR_HEAD: [f32; 4] = [0.93, 0.80, 0.68, 1.0];
    pub const DESK: [f32; 4] = [0.55, 0.38, 0.25, 1.0];
    pub const MONITOR: [f32; 4] = [0.12, 0.12, 0.16, 1.0];
    pub const CARD_BACKGROUND: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
    pub const CARD_IMAGE: [f32; 4] = [0.85, 0.86, 0.95, 1.0];
}
