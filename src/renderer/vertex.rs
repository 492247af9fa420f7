//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
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

/// Colors for game elements
pub mod colors {
    /// Daytime sky, used as the clear color
    pub const SKY: [f32; 4] = [0.42, 0.65, 0.89, 1.0];
    /// The player's swift: deep slate blue
    pub const PLAYER: [f32; 4] = [0.16, 0.22, 0.38, 1.0];
    /// The prey: pale gold
    pub const PREY: [f32; 4] = [0.98, 0.84, 0.35, 1.0];
    /// The pursuer: rust brown
    pub const PURSUER: [f32; 4] = [0.55, 0.3, 0.16, 1.0];
    /// Faint band marking the bottom of the playfield
    pub const GROUND: [f32; 4] = [0.33, 0.5, 0.3, 1.0];
}
